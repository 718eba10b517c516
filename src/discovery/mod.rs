//! Location to clinic-URL discovery.
//!
//! Three methods are tried in order, stopping at the first that finds
//! anything: the site's search pages, its directory pages filtered by
//! location, then URLs guessed from the postcode table. Guessed URLs are
//! flagged so the pipeline probes them before scraping.

pub mod location;

pub use location::{Location, DEFAULT_LOCATIONS};

use std::fmt;
use std::sync::LazyLock;

use scraper::Selector;
use tracing::{debug, info, warn};
use url::Url;

use crate::document::ParsedDocument;
use crate::scrapers::PageFetcher;
use crate::utils::text::push_unique;

static LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid link selector"));

/// Directory pages listing clinics.
const DIRECTORY_PATHS: &[&str] = &["/medical-centres", "/health-services", "/clinics"];

/// How a set of candidate URLs was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryMethod {
    Search,
    Directory,
    Generated,
}

impl DiscoveryMethod {
    /// Guessed URLs must pass a HEAD probe before they are scraped.
    pub fn needs_probe(&self) -> bool {
        matches!(self, Self::Generated)
    }
}

impl fmt::Display for DiscoveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Search => "search",
            Self::Directory => "directory",
            Self::Generated => "generated",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovered {
    pub method: Option<DiscoveryMethod>,
    pub urls: Vec<String>,
}

impl Discovered {
    fn none() -> Self {
        Self {
            method: None,
            urls: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Finds clinic pages for a location.
#[derive(Debug, Clone)]
pub struct Discovery {
    base_url: String,
    max_urls: usize,
}

impl Discovery {
    pub fn new(base_url: &str, max_urls: usize) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            max_urls,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The three search page URLs tried for `location`.
    pub fn search_urls(&self, location: &Location) -> Vec<String> {
        let slug = location.search_slug();
        vec![
            format!("{}/search?filters=&in={}", self.base_url, slug),
            format!("{}/search?in={}", self.base_url, slug),
            format!(
                "{}/medical-centres?location={}",
                self.base_url,
                urlencoding::encode(location.raw())
            ),
        ]
    }

    pub async fn discover(&self, fetcher: &PageFetcher, location: &Location) -> Discovered {
        let found = self.via_search(fetcher, location).await;
        let found = if found.is_empty() {
            self.via_directories(fetcher, location).await
        } else {
            found
        };
        let mut found = if found.is_empty() {
            self.generated(location)
        } else {
            found
        };

        found.urls.truncate(self.max_urls);
        match found.method {
            Some(method) => info!(
                "Found {} candidate URLs for {} via {}",
                found.urls.len(),
                location.raw(),
                method
            ),
            None => warn!("No candidate URLs for {}", location.raw()),
        }
        found
    }

    async fn via_search(&self, fetcher: &PageFetcher, location: &Location) -> Discovered {
        for search_url in self.search_urls(location) {
            let urls = match fetcher.fetch(&search_url).await {
                Ok(doc) => self.clinic_links(&doc),
                Err(e) => {
                    warn!("Search page failed: {}", e);
                    continue;
                }
            };
            if !urls.is_empty() {
                debug!("{} clinic links on {}", urls.len(), search_url);
                return Discovered {
                    method: Some(DiscoveryMethod::Search),
                    urls,
                };
            }
        }
        Discovered::none()
    }

    async fn via_directories(&self, fetcher: &PageFetcher, location: &Location) -> Discovered {
        let mut urls = Vec::new();
        for path in DIRECTORY_PATHS {
            let dir_url = format!("{}{}", self.base_url, path);
            match fetcher.fetch(&dir_url).await {
                Ok(doc) => {
                    for url in self.clinic_links(&doc) {
                        if location.matches_url(&url) {
                            push_unique(&mut urls, url);
                        }
                    }
                }
                Err(e) => warn!("Directory page failed: {}", e),
            }
        }

        if urls.is_empty() {
            Discovered::none()
        } else {
            Discovered {
                method: Some(DiscoveryMethod::Directory),
                urls,
            }
        }
    }

    /// Guessed URLs for `location`; empty for cities outside the table.
    pub fn generated(&self, location: &Location) -> Discovered {
        let urls = location.generated_urls(&self.base_url);
        if urls.is_empty() {
            Discovered::none()
        } else {
            Discovered {
                method: Some(DiscoveryMethod::Generated),
                urls,
            }
        }
    }

    /// Absolute links on `doc` that point at a clinic's doctors page.
    pub fn clinic_links(&self, doc: &ParsedDocument) -> Vec<String> {
        let Ok(base) = Url::parse(&self.base_url) else {
            return Vec::new();
        };
        let mut urls = Vec::new();
        for link in doc.html.select(&LINK) {
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            if !(href.contains("/medical-centres/") && href.contains("/doctors")) {
                continue;
            }
            if let Ok(url) = base.join(href) {
                push_unique(&mut urls, url.to_string());
            }
        }
        urls
    }
}
