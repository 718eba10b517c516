//! Browser-rendered page fetching.
//!
//! Uses chromiumoxide (CDP) to render pages whose practitioner lists are
//! built client-side. Only compiled with the `browser` feature; without it
//! the fetcher reports itself unavailable and the run uses plain HTTP.

mod config;

pub use config::BrowserEngineConfig;

#[cfg(feature = "browser")]
use std::sync::Arc;
#[cfg(feature = "browser")]
use std::time::Duration;

#[cfg(feature = "browser")]
use anyhow::Context;
use anyhow::Result;
use async_trait::async_trait;
#[cfg(feature = "browser")]
use tokio::sync::Mutex;
#[cfg(feature = "browser")]
use tokio::task::JoinHandle;
#[cfg(feature = "browser")]
use tracing::{debug, info, warn};

#[cfg(feature = "browser")]
use chromiumoxide::cdp::browser_protocol::page::NavigateParams;
#[cfg(feature = "browser")]
use chromiumoxide::{Browser, BrowserConfig, Page};
#[cfg(feature = "browser")]
use futures::StreamExt;

use super::fetcher::Renderer;
use crate::error::AutomationUnavailable;

/// Delay between checks for the ready selector.
#[cfg(feature = "browser")]
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Resolves once the document has fired `load`.
#[cfg(feature = "browser")]
const READY_STATE_SCRIPT: &str = r#"
    new Promise((resolve) => {
        if (document.readyState === 'complete') {
            resolve(document.readyState);
        } else {
            window.addEventListener('load', () => resolve(document.readyState));
        }
    })
"#;

/// chromiumoxide-backed renderer.
#[cfg(feature = "browser")]
pub struct BrowserFetcher {
    config: BrowserEngineConfig,
    browser: Option<Arc<Mutex<Browser>>>,
    handler: Option<JoinHandle<()>>,
}

#[cfg(feature = "browser")]
impl BrowserFetcher {
    /// Common Chrome executable paths to check.
    const CHROME_PATHS: &'static [&'static str] = &[
        // Linux
        "/usr/bin/google-chrome",
        "/usr/bin/google-chrome-stable",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/snap/bin/chromium",
        // macOS
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
        // Common install locations
        "/opt/google/chrome/google-chrome",
    ];

    pub fn new(config: BrowserEngineConfig) -> Self {
        Self {
            config,
            browser: None,
            handler: None,
        }
    }

    /// Find a Chrome executable on disk or in PATH.
    fn find_chrome() -> Result<std::path::PathBuf> {
        for path in Self::CHROME_PATHS {
            let p = std::path::Path::new(path);
            if p.exists() {
                info!("Found Chrome at: {}", path);
                return Ok(p.to_path_buf());
            }
        }

        for cmd in &[
            "google-chrome",
            "google-chrome-stable",
            "chromium",
            "chromium-browser",
        ] {
            if let Ok(output) = std::process::Command::new("which").arg(cmd).output() {
                if output.status.success() {
                    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                    if !path.is_empty() {
                        info!("Found Chrome in PATH: {}", path);
                        return Ok(std::path::PathBuf::from(path));
                    }
                }
            }
        }

        Err(anyhow::anyhow!(
            "Chrome/Chromium not found. Install chromium or set browser.remote_url"
        ))
    }

    async fn launch(&mut self) -> Result<()> {
        if let Some(remote_url) = self.config.remote_url.clone() {
            return self.connect_remote(&remote_url).await;
        }

        info!("Launching browser (headless={})", self.config.headless);
        let chrome_path = Self::find_chrome()?;

        let mut builder = BrowserConfig::builder().chrome_executable(chrome_path);

        // with_head means NOT headless
        if !self.config.headless {
            builder = builder.with_head();
        }

        if let Some(ref proxy) = self.config.proxy {
            builder = builder.arg(format!("--proxy-server={}", proxy));
        }

        builder = builder
            .arg("--disable-dev-shm-usage")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--no-sandbox")
            .arg("--disable-gpu");

        for arg in &self.config.chrome_args {
            builder = builder.arg(arg);
        }

        let config = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build browser config: {}", e))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("Failed to launch browser")?;

        self.handler = Some(tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        }));
        self.browser = Some(Arc::new(Mutex::new(browser)));
        Ok(())
    }

    /// Connect to a remote Chrome instance.
    async fn connect_remote(&mut self, url: &str) -> Result<()> {
        info!("Connecting to remote browser at {}", url);

        // The WebSocket URL comes from the /json/version endpoint
        let http_url = url
            .replace("ws://", "http://")
            .replace("wss://", "https://");
        let version_url = format!("{}/json/version", http_url.trim_end_matches('/'));

        let resp: serde_json::Value = reqwest::Client::new()
            .get(&version_url)
            .send()
            .await
            .context("Failed to connect to remote browser")?
            .json()
            .await
            .context("Failed to parse browser version info")?;

        let ws_url = resp
            .get("webSocketDebuggerUrl")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("No webSocketDebuggerUrl in response"))?;

        let handler_config = chromiumoxide::handler::HandlerConfig {
            request_timeout: Duration::from_secs(self.config.timeout_secs),
            ..Default::default()
        };

        let (browser, mut handler) = Browser::connect_with_config(ws_url, handler_config)
            .await
            .context("Failed to connect to remote browser")?;

        self.handler = Some(tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        }));
        self.browser = Some(Arc::new(Mutex::new(browser)));
        Ok(())
    }

    /// Poll for `selector` until it matches or the timeout passes.
    async fn wait_for_selector(&self, page: &Page, selector: &str) -> bool {
        let timeout = Duration::from_secs(self.config.timeout_secs);
        let found = tokio::time::timeout(timeout, async {
            loop {
                if page.find_element(selector).await.is_ok() {
                    return;
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        })
        .await;
        found.is_ok()
    }

    /// Wait for the navigation to commit and the document to finish loading.
    async fn wait_until_ready(&self, page: &Page, url: &str) {
        let timeout = Duration::from_secs(self.config.timeout_secs);
        if tokio::time::timeout(timeout, page.wait_for_navigation())
            .await
            .is_err()
        {
            warn!("Timeout waiting for navigation to {}", url);
        }

        match tokio::time::timeout(timeout, page.evaluate(READY_STATE_SCRIPT.to_string())).await {
            Ok(Ok(result)) => {
                let state: String = result
                    .into_value()
                    .unwrap_or_else(|_| "unknown".to_string());
                debug!("Ready state of {}: {}", url, state);
            }
            Ok(Err(e)) => debug!("Could not read ready state of {}: {}", url, e),
            Err(_) => warn!("Timeout waiting for {} to load", url),
        }
    }

    async fn render_page(&self, page: &Page, url: &str, wait_for: Option<&str>) -> Result<String> {
        let nav_params = NavigateParams::builder()
            .url(url)
            .build()
            .map_err(|e| anyhow::anyhow!("Invalid URL: {}", e))?;
        page.execute(nav_params).await?;
        self.wait_until_ready(page, url).await;

        if let Some(selector) = wait_for {
            if self.wait_for_selector(page, selector).await {
                debug!("Selector {} found on {}", selector, url);
            } else {
                warn!(
                    "Timeout waiting for {} on {}; using current markup",
                    selector, url
                );
            }
        }

        tokio::time::sleep(Duration::from_millis(self.config.settle_ms)).await;
        Ok(page.content().await?)
    }
}

#[cfg(feature = "browser")]
#[async_trait]
impl Renderer for BrowserFetcher {
    async fn start(&mut self) -> Result<(), AutomationUnavailable> {
        if self.browser.is_some() {
            return Ok(());
        }
        self.launch()
            .await
            .map_err(|e| AutomationUnavailable(format!("{:#}", e)))
    }

    async fn render(&mut self, url: &str, wait_for: Option<&str>) -> Result<String> {
        let browser = self.browser.clone().context("browser not started")?;
        let page = browser.lock().await.new_page("about:blank").await?;
        info!("Rendering {}", url);

        let result = self.render_page(&page, url, wait_for).await;

        // Close the page to prevent tab accumulation
        let _ = page.close().await;
        result
    }

    async fn close(&mut self) {
        if let Some(browser) = self.browser.take() {
            if let Err(e) = browser.lock().await.close().await {
                debug!("Browser close failed: {}", e);
            }
        }
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
    }
}

// Stub for when browser feature is disabled
#[cfg(not(feature = "browser"))]
pub struct BrowserFetcher {
    config: BrowserEngineConfig,
}

#[cfg(not(feature = "browser"))]
impl BrowserFetcher {
    pub fn new(config: BrowserEngineConfig) -> Self {
        Self { config }
    }
}

#[cfg(not(feature = "browser"))]
#[async_trait]
impl Renderer for BrowserFetcher {
    async fn start(&mut self) -> Result<(), AutomationUnavailable> {
        let _ = &self.config;
        Err(AutomationUnavailable(
            "browser support not compiled. Rebuild with: cargo build --features browser"
                .to_string(),
        ))
    }

    async fn render(&mut self, _url: &str, _wait_for: Option<&str>) -> Result<String> {
        Err(anyhow::anyhow!("browser support not compiled"))
    }

    async fn close(&mut self) {}
}
