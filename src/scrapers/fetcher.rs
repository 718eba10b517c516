//! Page acquisition with pacing, retries and an optional rendering backend.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::document::ParsedDocument;
use crate::error::{AutomationUnavailable, FetchError, TransportError};

/// Transport used for plain page fetches.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Body of `url`; non-2xx statuses are errors.
    async fn get_text(&self, url: &str) -> Result<String, TransportError>;

    /// Whether `url` answers a HEAD probe with 200.
    async fn exists(&self, url: &str) -> bool;
}

/// Backend that renders client-side pages before extraction.
#[async_trait]
pub trait Renderer: Send {
    async fn start(&mut self) -> Result<(), AutomationUnavailable>;

    /// Navigate to `url` and wait until the page has loaded and, when given,
    /// `wait_for` matches. Returns the rendered markup.
    async fn render(&mut self, url: &str, wait_for: Option<&str>) -> anyhow::Result<String>;

    async fn close(&mut self);
}

/// Delay ranges, in milliseconds, and the attempt budget per page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    /// Slept before every attempt.
    pub request_delay_ms: [u64; 2],
    /// Slept after a failed attempt when another one follows.
    pub retry_delay_ms: [u64; 2],
    pub max_attempts: u32,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            request_delay_ms: [1000, 3000],
            retry_delay_ms: [2000, 5000],
            max_attempts: 3,
        }
    }
}

impl Pacing {
    /// Pacing without any delays.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            request_delay_ms: [0, 0],
            retry_delay_ms: [0, 0],
            max_attempts,
        }
    }
}

/// Uniformly random duration within `[lo, hi]` milliseconds.
pub fn jitter(range: [u64; 2]) -> Duration {
    let (lo, hi) = if range[0] <= range[1] {
        (range[0], range[1])
    } else {
        (range[1], range[0])
    };
    if hi == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::rng().random_range(lo..=hi))
}

async fn pause(range: [u64; 2]) {
    let delay = jitter(range);
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

enum RendererState {
    Pending(Box<dyn Renderer>),
    Running(Box<dyn Renderer>),
    Unavailable,
}

/// Fetches pages for the pipeline.
///
/// Plain fetches go through the [`PageSource`]. Rendered fetches use the
/// [`Renderer`] when one was supplied and could be started; otherwise they
/// fall back to plain fetches for the rest of the run.
pub struct PageFetcher {
    source: Box<dyn PageSource>,
    pacing: Pacing,
    renderer: RendererState,
}

impl PageFetcher {
    pub fn new(source: Box<dyn PageSource>, pacing: Pacing) -> Self {
        Self {
            source,
            pacing,
            renderer: RendererState::Unavailable,
        }
    }

    /// Attach a rendering backend. It is started on first use.
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = RendererState::Pending(renderer);
        self
    }

    pub fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    pub fn has_renderer(&self) -> bool {
        !matches!(self.renderer, RendererState::Unavailable)
    }

    /// Fetch and parse `url`, retrying transient failures.
    pub async fn fetch(&self, url: &str) -> Result<ParsedDocument, FetchError> {
        let attempts = self.pacing.max_attempts.max(1);
        let mut last_cause = String::new();

        for attempt in 1..=attempts {
            pause(self.pacing.request_delay_ms).await;

            match self.source.get_text(url).await {
                Ok(markup) => {
                    debug!("Fetched {} ({} bytes, attempt {})", url, markup.len(), attempt);
                    return Ok(ParsedDocument::parse(url, &markup));
                }
                Err(e) => {
                    warn!("Attempt {}/{} for {} failed: {}", attempt, attempts, url, e);
                    last_cause = e.to_string();
                    if attempt < attempts {
                        pause(self.pacing.retry_delay_ms).await;
                    }
                }
            }
        }

        error!("Giving up on {} after {} attempts", url, attempts);
        Err(FetchError::Exhausted {
            url: url.to_string(),
            attempts,
            last_cause,
        })
    }

    /// Fetch `url` through the renderer, waiting for the page to load and
    /// then for `wait_for` when given. Falls back to [`PageFetcher::fetch`]
    /// when rendering is not possible.
    pub async fn fetch_rendered(
        &mut self,
        url: &str,
        wait_for: Option<&str>,
    ) -> Result<ParsedDocument, FetchError> {
        let request_delay = self.pacing.request_delay_ms;
        if let Some(renderer) = self.running_renderer().await {
            pause(request_delay).await;
            match renderer.render(url, wait_for).await {
                Ok(markup) => {
                    debug!("Rendered {} ({} bytes)", url, markup.len());
                    return Ok(ParsedDocument::parse(url, &markup));
                }
                Err(e) => warn!("Rendering {} failed, using HTTP: {:#}", url, e),
            }
        }
        self.fetch(url).await
    }

    /// HEAD probe for guessed URLs.
    pub async fn exists(&self, url: &str) -> bool {
        self.source.exists(url).await
    }

    /// Shut down the renderer if it was started.
    pub async fn close(&mut self) {
        if let RendererState::Running(renderer) = &mut self.renderer {
            renderer.close().await;
        }
        self.renderer = RendererState::Unavailable;
    }

    async fn running_renderer(&mut self) -> Option<&mut Box<dyn Renderer>> {
        if let RendererState::Pending(_) = self.renderer {
            let state = std::mem::replace(&mut self.renderer, RendererState::Unavailable);
            if let RendererState::Pending(mut renderer) = state {
                match renderer.start().await {
                    Ok(()) => {
                        info!("Browser rendering enabled");
                        self.renderer = RendererState::Running(renderer);
                    }
                    Err(e) => warn!("{}; using HTTP for the rest of the run", e),
                }
            }
        }

        match &mut self.renderer {
            RendererState::Running(renderer) => Some(renderer),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Serves queued responses in order, repeating the last one.
    struct Scripted {
        responses: Mutex<VecDeque<Result<String, u16>>>,
        calls: Arc<AtomicUsize>,
    }

    impl Scripted {
        fn new(responses: Vec<Result<&str, u16>>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let responses = responses
                .into_iter()
                .map(|r| r.map(String::from))
                .collect();
            (
                Self {
                    responses: Mutex::new(responses),
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl PageSource for Scripted {
        async fn get_text(&self, _url: &str) -> Result<String, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut queue = self.responses.lock().unwrap();
            let next = if queue.len() > 1 {
                queue.pop_front().unwrap()
            } else {
                queue.front().cloned().unwrap()
            };
            next.map_err(TransportError::Status)
        }

        async fn exists(&self, url: &str) -> bool {
            url.ends_with("/doctors")
        }
    }

    struct FakeRenderer {
        start_ok: bool,
        fail_render: bool,
        starts: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Renderer for FakeRenderer {
        async fn start(&mut self) -> Result<(), AutomationUnavailable> {
            self.starts.fetch_add(1, Ordering::SeqCst);
            if self.start_ok {
                Ok(())
            } else {
                Err(AutomationUnavailable("no chrome".to_string()))
            }
        }

        async fn render(&mut self, _url: &str, wait_for: Option<&str>) -> anyhow::Result<String> {
            if self.fail_render {
                anyhow::bail!("navigation failed");
            }
            Ok(format!(
                "<html><body><p>rendered {}</p></body></html>",
                wait_for.unwrap_or("after load")
            ))
        }

        async fn close(&mut self) {}
    }

    #[tokio::test]
    async fn test_retries_then_succeeds() {
        let (source, calls) = Scripted::new(vec![Err(503), Ok("<p>ok</p>")]);
        let fetcher = PageFetcher::new(Box::new(source), Pacing::immediate(3));
        let doc = fetcher.fetch("https://example.test/a").await.unwrap();
        assert!(doc.page_text().contains("ok"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_exhausted_after_max_attempts() {
        let (source, calls) = Scripted::new(vec![Err(500)]);
        let fetcher = PageFetcher::new(Box::new(source), Pacing::immediate(3));
        let err = fetcher.fetch("https://example.test/a").await.err().unwrap();
        match err {
            FetchError::Exhausted {
                url,
                attempts,
                last_cause,
            } => {
                assert_eq!(url, "https://example.test/a");
                assert_eq!(attempts, 3);
                assert!(last_cause.contains("500"));
            }
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_renderer_start_failure_degrades_for_run() {
        let (source, _) = Scripted::new(vec![Ok("<p>plain</p>")]);
        let starts = Arc::new(AtomicUsize::new(0));
        let mut fetcher = PageFetcher::new(Box::new(source), Pacing::immediate(1)).with_renderer(
            Box::new(FakeRenderer {
                start_ok: false,
                fail_render: false,
                starts: starts.clone(),
            }),
        );

        for _ in 0..2 {
            let doc = fetcher.fetch_rendered("https://example.test/a", None).await.unwrap();
            assert!(doc.page_text().contains("plain"));
        }
        assert_eq!(starts.load(Ordering::SeqCst), 1);
        assert!(!fetcher.has_renderer());
    }

    #[tokio::test]
    async fn test_rendered_fetch_and_per_url_fallback() {
        let (source, _) = Scripted::new(vec![Ok("<p>plain</p>")]);
        let starts = Arc::new(AtomicUsize::new(0));
        let mut fetcher = PageFetcher::new(Box::new(source), Pacing::immediate(1)).with_renderer(
            Box::new(FakeRenderer {
                start_ok: true,
                fail_render: false,
                starts: starts.clone(),
            }),
        );
        let doc = fetcher
            .fetch_rendered("https://example.test/a", Some(".DoctorAvailabilityRow"))
            .await
            .unwrap();
        assert!(doc.page_text().contains("rendered .DoctorAvailabilityRow"));
        let doc = fetcher.fetch_rendered("https://example.test/b", None).await.unwrap();
        assert!(doc.page_text().contains("rendered after load"));

        let (source, _) = Scripted::new(vec![Ok("<p>plain</p>")]);
        let mut fetcher = PageFetcher::new(Box::new(source), Pacing::immediate(1)).with_renderer(
            Box::new(FakeRenderer {
                start_ok: true,
                fail_render: true,
                starts,
            }),
        );
        let doc = fetcher.fetch_rendered("https://example.test/a", None).await.unwrap();
        assert!(doc.page_text().contains("plain"));
        assert!(fetcher.has_renderer());
    }

    #[tokio::test]
    async fn test_exists_delegates() {
        let (source, _) = Scripted::new(vec![Ok("")]);
        let fetcher = PageFetcher::new(Box::new(source), Pacing::immediate(1));
        assert!(fetcher.exists("https://example.test/x/doctors").await);
        assert!(!fetcher.exists("https://example.test/x").await);
    }

    #[test]
    fn test_jitter_bounds() {
        for _ in 0..50 {
            let d = jitter([10, 20]).as_millis();
            assert!((10..=20).contains(&d));
        }
        assert_eq!(jitter([0, 0]), Duration::ZERO);
        let swapped = jitter([20, 10]).as_millis();
        assert!((10..=20).contains(&swapped));
    }
}
