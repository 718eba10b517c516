//! Error types for the scraping pipeline.
//!
//! Field extractors never produce errors: a missing field is an absent
//! value. Everything here is either caught at the per-URL boundary
//! (`FetchError`), degrades the run (`AutomationUnavailable`) or is a
//! configuration problem reported before any scraping starts.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single transport attempt.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("{0}")]
    Other(String),
}

/// A page could not be fetched after all attempts.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to fetch {url} after {attempts} attempts: {last_cause}")]
    Exhausted {
        url: String,
        attempts: u32,
        last_cause: String,
    },
}

impl FetchError {
    /// URL that could not be fetched.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Exhausted { url, .. } => url,
        }
    }
}

/// The browser backend could not be started.
#[derive(Debug, Error)]
#[error("browser automation unavailable: {0}")]
pub struct AutomationUnavailable(pub String);

/// Invalid entry in the extraction rule table.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid CSS selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },
    #[error("invalid pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Configuration file problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid setting: {0}")]
    Invalid(String),
    #[error(transparent)]
    Rules(#[from] RuleError),
}

/// Failures while writing exports or checkpoints.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
