//! Configuration display.

use console::style;

use crate::config::Settings;

/// Print the effective settings, including the full rule table.
pub fn cmd_config_show(settings: &Settings) -> anyhow::Result<()> {
    match &settings.source_path {
        Some(path) => println!("# {} {}", style("Loaded from").dim(), path.display()),
        None => println!("# {}", style("Built-in defaults").dim()),
    }
    print!("{}", toml::to_string_pretty(settings)?);
    Ok(())
}
