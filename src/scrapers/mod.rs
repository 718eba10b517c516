//! Page acquisition: plain HTTP, browser rendering and the retrying fetcher
//! that sits in front of both.

pub mod browser;
pub mod fetcher;
mod http_client;

pub use browser::{BrowserEngineConfig, BrowserFetcher};
pub use fetcher::{jitter, PageFetcher, PageSource, Pacing, Renderer};
pub use http_client::{resolve_user_agent, HttpClient, USER_AGENT};
