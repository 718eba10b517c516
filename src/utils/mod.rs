//! Shared utility functions.
//!
//! - `text`: whitespace collapsing, title-casing and order-preserving
//!   de-duplication used by the field extractors and the normalizer

pub mod text;
