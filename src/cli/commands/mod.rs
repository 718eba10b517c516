//! Command implementations.

pub mod candidates;
pub mod config_cmd;
pub mod scrape;
