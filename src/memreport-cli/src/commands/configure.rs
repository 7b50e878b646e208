//! `memreport config` - show or update stored defaults.

use anyhow::Result;

use crate::cli::OutputFormat;
use crate::config::Config;

pub fn handle(format: Option<OutputFormat>, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if let Some(format) = format {
        config.format = Some(
            match format {
                OutputFormat::Text => "text",
                OutputFormat::Json => "json",
            }
            .to_string(),
        );
        config.save()?;
        println!(
            "Default output format set to {}",
            config.format.as_deref().unwrap_or("text")
        );
    }

    if show || format.is_none() {
        println!("Config file: {}", Config::config_path()?.display());
        println!("  format: {}", config.format.as_deref().unwrap_or("text"));
        match config.header_lines {
            Some(n) => println!("  header_lines: {}", n),
            None => println!("  header_lines: (default)"),
        }
    }

    Ok(())
}
