//! clinic-scrape - clinic and practitioner directory scraper.
//!
//! Fetches clinic pages from a medical directory (HotDoc Australia by
//! default), locates practitioner blocks with an ordered cascade of
//! selector strategies and normalizes what it finds into clinic and
//! practitioner records for export.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod document;
pub mod error;
pub mod export;
pub mod extract;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod scrapers;
pub mod utils;
