//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "memreport")]
#[command(about = "Decode engine memory reports into typed tables", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a report and print a digest or the full JSON document
    Decode {
        /// Report file (.txt / .memreport)
        input: PathBuf,

        /// Emit the full decoded report as JSON
        #[arg(long)]
        json: bool,

        /// Only show the category with this canonical key
        #[arg(long)]
        category: Option<String>,

        /// Metadata header length, when a dump deviates from the
        /// 7-line convention
        #[arg(long)]
        header_lines: Option<usize>,
    },

    /// Print the report metadata header
    Meta {
        /// Report file
        input: PathBuf,

        /// Emit as JSON
        #[arg(long)]
        json: bool,
    },

    /// List category keys, their kind, and body line counts
    Categories {
        /// Report file
        input: PathBuf,
    },

    /// Show or update stored defaults
    Config {
        /// Default output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Print the current configuration
        #[arg(long)]
        show: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
