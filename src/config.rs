//! Configuration loading.
//!
//! Settings come from a TOML file found via `--config`, the
//! `CLINICS_CONFIG` environment variable or `./clinics.toml`, in that
//! order. Without a file the built-in HotDoc defaults apply. Command-line
//! flags are applied on top by the CLI.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;
use crate::export::ExportFormat;
use crate::extract::{ExtractionRules, Extractor};
use crate::scrapers::{BrowserEngineConfig, Pacing};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "CLINICS_CONFIG";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "clinics.toml";

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// File stem prefix; a timestamp is appended per run.
    pub prefix: String,
    /// Formats written in addition to JSON.
    pub formats: Vec<ExportFormat>,
    /// Records between partial exports (0 disables).
    pub checkpoint_every: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            prefix: "hotdoc_doctors".to_string(),
            formats: Vec::new(),
            checkpoint_every: 100,
        }
    }
}

/// All runtime settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Site root used for discovery and link resolution.
    pub base_url: String,
    /// Site name excluded from clinic-name candidates.
    pub site_name: String,
    /// `None` for the crate's own agent, `"impersonate"` for a random
    /// browser agent, anything else verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub request_timeout_secs: u64,
    pub max_urls_per_location: usize,
    pub pacing: Pacing,
    pub browser: BrowserEngineConfig,
    pub output: OutputConfig,
    pub rules: ExtractionRules,

    /// File the settings were read from.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "https://www.hotdoc.com.au".to_string(),
            site_name: "HotDoc".to_string(),
            user_agent: None,
            request_timeout_secs: 30,
            max_urls_per_location: 50,
            pacing: Pacing::default(),
            browser: BrowserEngineConfig::default(),
            output: OutputConfig::default(),
            rules: ExtractionRules::default(),
            source_path: None,
        }
    }
}

/// Options for locating the config file.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides discovery).
    pub config_path: Option<PathBuf>,
}

impl Settings {
    /// Load from a specific TOML file.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let mut settings = Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.source_path = Some(path.to_path_buf());
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Discover and load settings. An explicitly named file that cannot
    /// be read is an error; a missing `./clinics.toml` is not.
    pub async fn load(options: &LoadOptions) -> Result<Self, ConfigError> {
        if let Some(path) = &options.config_path {
            return Self::load_from_path(path).await;
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            tracing::debug!("Using config from {}", CONFIG_ENV);
            return Self::load_from_path(Path::new(&path)).await;
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if tokio::fs::try_exists(local).await.unwrap_or(false) {
            tracing::debug!("Found {} in working directory", DEFAULT_CONFIG_FILE);
            return Self::load_from_path(local).await;
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Reject settings the run cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.base_url)
            .map_err(|e| ConfigError::Invalid(format!("base_url {:?}: {}", self.base_url, e)))?;
        if self.pacing.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "pacing.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        self.extractor()?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Compile the rule table.
    pub fn extractor(&self) -> Result<Extractor, ConfigError> {
        Ok(Extractor::new(self.rules.clone(), &self.site_name)?)
    }
}
