//! Command-line interface.
//!
//! Parses arguments, loads settings and dispatches to the command modules.

mod commands;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{LoadOptions, Settings};
use crate::export::ExportFormat;
use crate::pipeline::ScrapeOptions;

#[derive(Parser)]
#[command(name = "clinics")]
#[command(about = "Clinic and practitioner directory scraper")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by the commands that scrape and write output.
#[derive(Args, Debug, Clone, Default)]
pub struct ScrapeArgs {
    /// Render clinic pages in a headless browser
    #[arg(long)]
    browser: bool,

    /// CSS selector to wait for when rendering
    #[arg(long, value_name = "CSS")]
    wait_for: Option<String>,

    /// Visit practitioner profile pages for extra details
    #[arg(long)]
    profiles: bool,

    /// Directory for output files
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Output file prefix (a timestamp is appended)
    #[arg(long)]
    prefix: Option<String>,

    /// Additional output format (repeatable; JSON is always written)
    #[arg(short = 'f', long = "format", value_enum)]
    formats: Vec<ExportFormat>,

    /// Records between partial exports (0 disables)
    #[arg(long, value_name = "N")]
    checkpoint_every: Option<usize>,
}

impl ScrapeArgs {
    /// Apply output overrides to `settings` and return the run options.
    fn apply(&self, settings: &mut Settings) -> ScrapeOptions {
        if let Some(dir) = &self.output_dir {
            settings.output.dir = dir.clone();
        }
        if let Some(prefix) = &self.prefix {
            settings.output.prefix = prefix.clone();
        }
        for format in &self.formats {
            if !settings.output.formats.contains(format) {
                settings.output.formats.push(*format);
            }
        }
        if let Some(every) = self.checkpoint_every {
            settings.output.checkpoint_every = every;
        }

        ScrapeOptions {
            browser: self.browser,
            wait_for: self.wait_for.clone(),
            profiles: self.profiles,
            show_progress: true,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Discover and scrape clinics for one or more locations
    Scrape {
        /// Locations such as "Sydney, NSW" (or use --all)
        locations: Vec<String>,
        /// Scrape the built-in list of Australian cities and regions
        #[arg(short, long)]
        all: bool,
        #[command(flatten)]
        args: ScrapeArgs,
    },

    /// Scrape a single clinic page
    Url {
        /// Clinic page URL
        url: String,
        #[command(flatten)]
        args: ScrapeArgs,
    },

    /// List candidate clinic URLs for a location without scraping them
    Candidates {
        /// Location such as "Sydney, NSW"
        location: String,
    },

    /// Print the effective configuration as TOML
    Config,
}

/// Run the CLI.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let options = LoadOptions {
        config_path: cli.config,
    };
    let mut settings = Settings::load(&options).await?;
    if let Some(path) = &settings.source_path {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Commands::Scrape {
            locations,
            all,
            args,
        } => {
            let options = args.apply(&mut settings);
            commands::scrape::cmd_scrape(&settings, &locations, all, options).await
        }
        Commands::Url { url, args } => {
            let options = args.apply(&mut settings);
            commands::scrape::cmd_url(&settings, &url, options).await
        }
        Commands::Candidates { location } => {
            commands::candidates::cmd_candidates(&settings, &location).await
        }
        Commands::Config => commands::config_cmd::cmd_config_show(&settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scrape() {
        let cli = Cli::try_parse_from([
            "clinics",
            "-v",
            "scrape",
            "Sydney, NSW",
            "Hobart, TAS",
            "--profiles",
            "-f",
            "csv",
            "-f",
            "grouped",
            "--checkpoint-every",
            "0",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Scrape {
                locations,
                all,
                args,
            } => {
                assert_eq!(locations, vec!["Sydney, NSW", "Hobart, TAS"]);
                assert!(!all);
                assert!(args.profiles);
                assert_eq!(args.formats, vec![ExportFormat::Csv, ExportFormat::Grouped]);
                assert_eq!(args.checkpoint_every, Some(0));
            }
            _ => panic!("expected scrape"),
        }
    }

    #[test]
    fn test_args_override_settings() {
        let cli = Cli::try_parse_from([
            "clinics",
            "url",
            "https://example.test/clinic/doctors",
            "--browser",
            "--wait-for",
            ".DoctorAvailabilityRow",
            "-o",
            "out",
            "--prefix",
            "run",
            "-f",
            "text",
        ])
        .unwrap();
        let Commands::Url { args, .. } = cli.command else {
            panic!("expected url");
        };

        let mut settings = Settings::default();
        let options = args.apply(&mut settings);
        assert!(options.browser);
        assert_eq!(options.wait_for.as_deref(), Some(".DoctorAvailabilityRow"));
        assert_eq!(settings.output.dir, PathBuf::from("out"));
        assert_eq!(settings.output.prefix, "run");
        assert_eq!(settings.output.formats, vec![ExportFormat::Text]);
        assert_eq!(settings.output.checkpoint_every, 100);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "clinics",
            "candidates",
            "Perth, WA",
            "--log-file",
            "run.log",
            "-c",
            "my.toml",
        ])
        .unwrap();
        assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
        assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
    }
}
