//! Field-level heuristics.
//!
//! Each extractor is independent and returns `Option` or an empty `Vec`
//! when the markup does not carry the field. None of them can fail.

pub mod address;
pub mod bio;
pub mod contact;
pub mod credentials;
pub mod interests;
pub mod languages;
pub mod name;
pub mod rating;
pub mod services;

pub use address::AddressParts;
pub use credentials::{CredentialRules, Credentials};
pub use interests::InterestRules;
pub use name::{Honorifics, NameParts};
