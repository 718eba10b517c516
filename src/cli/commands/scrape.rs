//! Scrape commands.

use console::style;

use super::super::report;
use crate::aggregate::RunContext;
use crate::config::Settings;
use crate::discovery::{Location, DEFAULT_LOCATIONS};
use crate::export::{timestamped_stem, write_outputs};
use crate::pipeline::{ClinicScraper, ScrapeOptions};

/// Scrape clinics for the given locations (or the built-in list).
pub async fn cmd_scrape(
    settings: &Settings,
    locations: &[String],
    all: bool,
    options: ScrapeOptions,
) -> anyhow::Result<()> {
    let locations: Vec<Location> = if all {
        DEFAULT_LOCATIONS.iter().map(|l| Location::parse(l)).collect()
    } else {
        locations.iter().map(|l| Location::parse(l)).collect()
    };
    if locations.is_empty() {
        anyhow::bail!("No locations specified. Use --all or provide locations.");
    }

    println!(
        "{} Scraping {} location{}...",
        style("→").cyan(),
        locations.len(),
        if locations.len() == 1 { "" } else { "s" }
    );

    let mut scraper = ClinicScraper::from_settings(settings, options)?;
    for (i, location) in locations.iter().enumerate() {
        let added = scraper.scrape_location(location).await;
        println!(
            "  {} [{}/{}] {}: {} practitioners ({} total)",
            if added > 0 {
                style("✓").green()
            } else {
                style("○").dim()
            },
            i + 1,
            locations.len(),
            location.raw(),
            added,
            scraper.context().len()
        );
    }

    finish(settings, scraper.finish().await)
}

/// Scrape a single clinic page.
pub async fn cmd_url(settings: &Settings, url: &str, options: ScrapeOptions) -> anyhow::Result<()> {
    let mut scraper = ClinicScraper::from_settings(settings, options)?;
    match scraper.scrape_url(url).await {
        Ok(added) => println!(
            "{} {}: {} practitioners",
            style("✓").green(),
            url,
            added
        ),
        Err(e) => println!("{} {}", style("✗").red(), e),
    }
    finish(settings, scraper.finish().await)
}

fn finish(settings: &Settings, ctx: RunContext) -> anyhow::Result<()> {
    if ctx.is_empty() {
        println!(
            "{} No practitioners found; nothing written.",
            style("!").yellow()
        );
        return Ok(());
    }

    let stem = timestamped_stem(&settings.output.prefix);
    let written = write_outputs(
        ctx.records(),
        &settings.output.dir,
        &stem,
        &settings.output.formats,
    )?;
    for path in &written {
        println!("{} Saved {}", style("✓").green(), path.display());
    }

    report::print_summary(&ctx.stats(), ctx.visited_count());
    Ok(())
}
