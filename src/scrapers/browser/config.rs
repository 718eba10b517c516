//! Browser rendering configuration.

use serde::{Deserialize, Serialize};

/// `[browser]` section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserEngineConfig {
    /// Run in headless mode (default: true).
    pub headless: bool,

    /// Longest wait for the ready selector, in seconds.
    pub timeout_secs: u64,

    /// Fixed pause after the ready selector appears, in milliseconds.
    pub settle_ms: u64,

    /// Ready selector used when the command line gives none.
    pub wait_for: Option<String>,

    /// Proxy server URL (e.g., "socks5://127.0.0.1:1080").
    pub proxy: Option<String>,

    /// Additional Chrome arguments.
    pub chrome_args: Vec<String>,

    /// Remote Chrome DevTools URL (e.g., "ws://localhost:9222").
    /// If set, connects to an existing browser instead of launching one.
    pub remote_url: Option<String>,
}

impl Default for BrowserEngineConfig {
    fn default() -> Self {
        Self {
            headless: true,
            timeout_secs: 30,
            settle_ms: 3000,
            wait_for: None,
            proxy: None,
            chrome_args: Vec::new(),
            remote_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_section() {
        let config: BrowserEngineConfig = toml::from_str("settle_ms = 500\nheadless = false").unwrap();
        assert_eq!(config.settle_ms, 500);
        assert!(!config.headless);
        assert_eq!(config.timeout_secs, 30);
    }
}
