//! Sequential run driver.
//!
//! One URL is fetched, extracted and recorded before the next begins.
//! Failures are contained per URL: they are logged and the run moves on.

use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::aggregate::RunContext;
use crate::config::Settings;
use crate::discovery::{Discovered, Discovery, Location};
use crate::error::FetchError;
use crate::export::Checkpointer;
use crate::extract::Extractor;
use crate::models::PractitionerRecord;
use crate::scrapers::{BrowserFetcher, HttpClient, PageFetcher};

/// Per-run behaviour switches.
#[derive(Debug, Clone, Default)]
pub struct ScrapeOptions {
    /// Render clinic pages in a browser when one can be started.
    pub browser: bool,
    /// Selector to wait for when rendering.
    pub wait_for: Option<String>,
    /// Visit each practitioner's profile page for extra details.
    pub profiles: bool,
    /// Draw a progress bar per location.
    pub show_progress: bool,
}

pub struct ClinicScraper {
    fetcher: PageFetcher,
    extractor: Extractor,
    discovery: Discovery,
    context: RunContext,
    checkpoints: Checkpointer,
    options: ScrapeOptions,
}

impl ClinicScraper {
    pub fn new(
        fetcher: PageFetcher,
        extractor: Extractor,
        discovery: Discovery,
        checkpoints: Checkpointer,
        options: ScrapeOptions,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            discovery,
            context: RunContext::new(),
            checkpoints,
            options,
        }
    }

    /// Build the HTTP stack, and the browser backend when requested.
    pub fn from_settings(settings: &Settings, options: ScrapeOptions) -> anyhow::Result<Self> {
        let client = HttpClient::new(settings.user_agent.as_deref(), settings.request_timeout())?;
        debug!("User agent: {}", client.user_agent());

        let mut fetcher = PageFetcher::new(Box::new(client), settings.pacing.clone());
        if options.browser {
            fetcher = fetcher.with_renderer(Box::new(BrowserFetcher::new(settings.browser.clone())));
        }

        let options = ScrapeOptions {
            wait_for: options.wait_for.or_else(|| settings.browser.wait_for.clone()),
            ..options
        };

        Ok(Self::new(
            fetcher,
            settings.extractor()?,
            Discovery::new(&settings.base_url, settings.max_urls_per_location),
            Checkpointer::new(
                &settings.output.dir,
                &settings.output.prefix,
                settings.output.checkpoint_every,
            ),
            options,
        ))
    }

    pub fn context(&self) -> &RunContext {
        &self.context
    }

    pub fn discovery(&self) -> &Discovery {
        &self.discovery
    }

    /// Candidate URLs for `location`, without scraping them.
    pub async fn candidates(&self, location: &Location) -> Discovered {
        self.discovery.discover(&self.fetcher, location).await
    }

    /// Scrape one clinic page. Returns the number of records added; an
    /// already-visited URL adds none.
    pub async fn scrape_url(&mut self, url: &str) -> Result<usize, FetchError> {
        if !self.context.mark_visited(url) {
            debug!("Skipping already visited {}", url);
            return Ok(0);
        }

        let (clinic, records) = {
            let doc = if self.options.browser {
                self.fetcher
                    .fetch_rendered(url, self.options.wait_for.as_deref())
                    .await?
            } else {
                self.fetcher.fetch(url).await?
            };
            let clinic = Arc::new(self.extractor.clinic(&doc));
            let records = self.extractor.practitioners(&doc, &clinic);
            (clinic, records)
        };

        let records = if self.options.profiles {
            self.enrich(records).await
        } else {
            records
        };

        let added = records.len();
        info!(
            "Found {} practitioners at {}",
            added,
            clinic.display_name()
        );
        self.context.add_records(records);
        if let Some(path) = self.checkpoints.maybe_write(self.context.records()) {
            debug!("Checkpoint written to {}", path.display());
        }
        Ok(added)
    }

    async fn enrich(&self, records: Vec<PractitionerRecord>) -> Vec<PractitionerRecord> {
        let mut enriched = Vec::with_capacity(records.len());
        for record in records {
            let Some(profile_url) = record.profile_url.clone() else {
                enriched.push(record);
                continue;
            };
            let details = match self.fetcher.fetch(&profile_url).await {
                Ok(doc) => self.extractor.profile(&doc),
                Err(e) => {
                    warn!("Profile for {} unavailable: {}", record.cleaned_name, e);
                    enriched.push(record);
                    continue;
                }
            };
            enriched.push(record.with_profile(details));
        }
        enriched
    }

    /// Discover and scrape every clinic for `location`.
    pub async fn scrape_location(&mut self, location: &Location) -> usize {
        info!("Scraping {}", location.raw());
        let found = self.discovery.discover(&self.fetcher, location).await;
        let probe = found.method.is_some_and(|m| m.needs_probe());

        let pb = if self.options.show_progress {
            let pb = ProgressBar::new(found.urls.len() as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb
        } else {
            ProgressBar::hidden()
        };
        pb.set_message(location.raw().to_string());

        let mut added = 0;
        for url in &found.urls {
            pb.inc(1);
            if self.context.is_visited(url) {
                continue;
            }
            if probe && !self.fetcher.exists(url).await {
                debug!("No page at {}", url);
                continue;
            }
            match self.scrape_url(url).await {
                Ok(n) => added += n,
                Err(e) => warn!("Skipping {}: {}", url, e),
            }
        }
        pb.finish_and_clear();

        info!("{}: {} practitioners", location.raw(), added);
        added
    }

    pub async fn scrape_locations(&mut self, locations: &[Location]) -> usize {
        let mut added = 0;
        for location in locations {
            added += self.scrape_location(location).await;
        }
        added
    }

    /// Shut down the fetcher and hand back the run's records.
    pub async fn finish(mut self) -> RunContext {
        self.fetcher.close().await;
        self.context
    }
}
