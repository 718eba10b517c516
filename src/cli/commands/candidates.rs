//! Candidate URL listing.

use console::style;

use crate::config::Settings;
use crate::discovery::Location;
use crate::pipeline::{ClinicScraper, ScrapeOptions};

/// Print the URLs discovery finds for `location`.
pub async fn cmd_candidates(settings: &Settings, location: &str) -> anyhow::Result<()> {
    let location = Location::parse(location);
    let scraper = ClinicScraper::from_settings(settings, ScrapeOptions::default())?;
    let found = scraper.candidates(&location).await;

    let Some(method) = found.method else {
        println!(
            "{} No candidate URLs for {}",
            style("✗").red(),
            location.raw()
        );
        return Ok(());
    };

    println!(
        "{} {} candidate URLs for {} (via {})",
        style("→").cyan(),
        found.urls.len(),
        location.raw(),
        method
    );
    if method.needs_probe() {
        println!(
            "  {} guessed URLs; each is checked with a HEAD request before scraping",
            style("!").yellow()
        );
    }
    for url in &found.urls {
        println!("  {}", url);
    }
    Ok(())
}
