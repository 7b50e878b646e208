mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memreport=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode {
            input,
            json,
            category,
            header_lines,
        } => {
            commands::decode::handle(&input, json, category.as_deref(), header_lines)?;
        }

        Commands::Meta { input, json } => {
            commands::inspect::meta(&input, json)?;
        }

        Commands::Categories { input } => {
            commands::inspect::categories(&input)?;
        }

        Commands::Config { format, show } => {
            commands::configure::handle(format, show)?;
        }
    }

    Ok(())
}
