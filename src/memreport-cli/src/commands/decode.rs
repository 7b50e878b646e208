//! `memreport decode` - decode a report file and print the result.

use std::path::Path;

use anyhow::{bail, Context, Result};
use memreport::{CategoryData, CategoryOutcome, DecodedCategory, DecodedReport, METADATA_LINES};

use crate::commands::read_report;
use crate::config::Config;

pub fn handle(
    input: &Path,
    json: bool,
    category: Option<&str>,
    header_lines: Option<usize>,
) -> Result<()> {
    let config = Config::load()?;
    let header_lines = header_lines
        .or(config.header_lines)
        .unwrap_or(METADATA_LINES);

    let lines = read_report(input)?;
    let report = memreport::decode_lines_with_header(&lines, header_lines)
        .context("Failed to decode report")?;
    tracing::info!(
        categories = report.categories.len(),
        warnings = report.warnings.len(),
        "report decoded"
    );

    if let Some(key) = category {
        let Some(decoded) = report.category(key) else {
            bail!("No category {:?} in this report", key);
        };
        if json || config.prefers_json() {
            println!("{}", serde_json::to_string_pretty(decoded)?);
        } else {
            print_category(decoded);
        }
        return Ok(());
    }

    if json || config.prefers_json() {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_digest(&report);
    }

    Ok(())
}

fn print_digest(report: &DecodedReport) {
    println!("Metadata ({} fields):", report.metadata.len());
    let mut fields: Vec<(&String, &String)> = report.metadata.iter().collect();
    fields.sort();
    for (key, value) in fields {
        println!("  {}: {}", key, value);
    }

    println!();
    println!("Categories ({}):", report.categories.len());
    for category in &report.categories {
        print_category(category);
    }

    if !report.warnings.is_empty() {
        println!();
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  {}", warning);
        }
    }
}

fn print_category(category: &DecodedCategory) {
    let summary = match &category.outcome {
        CategoryOutcome::Decoded(data) => match data {
            CategoryData::ClassUsage(table) => {
                format!(
                    "{} records, {} objects in summary",
                    table.records.len(),
                    table.summary.objects
                )
            }
            CategoryData::TextureList(table) => {
                format!(
                    "{} records, {} summary groups",
                    table.records.len(),
                    table.summary.len()
                )
            }
            CategoryData::ConfigMem { entries } => format!("{} entries", entries.len()),
            CategoryData::RenderTargetPool { entries } => format!("{} entries", entries.len()),
            CategoryData::NotYetSupported { lines } => {
                format!("not yet supported, {} raw lines", lines.len())
            }
            CategoryData::Unrecognized { lines } => {
                format!("unrecognized, {} raw lines", lines.len())
            }
        },
        CategoryOutcome::Failed(error) => format!("FAILED: {}", error),
    };

    println!("  {} [{}]: {}", category.key, category.kind.name(), summary);
    for warning in &category.warnings {
        println!("    warning: {}", warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_decode_roundtrip_through_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Platform: Win64").unwrap();
        for _ in 0..6 {
            writeln!(file, "Key: value").unwrap();
        }
        writeln!(file, "MemReport: Begin command \"ConfigMem\"").unwrap();
        writeln!(file, "Config memory usage:").unwrap();
        writeln!(file, "Current and peak bytes held per file:").unwrap();
        writeln!(file, "FileName NumBytes MaxBytes").unwrap();
        writeln!(file, "FooBar 2097152 4194304").unwrap();
        writeln!(file, "Total 2097152 4194304").unwrap();
        writeln!(file, "MemReport: End command").unwrap();

        let lines = read_report(file.path()).unwrap();
        let report = memreport::decode_lines(&lines).unwrap();
        assert_eq!(report.metadata["Platform"], "Win64");

        let config = report.category("ConfigMem").unwrap();
        assert!(matches!(
            config.data(),
            Some(CategoryData::ConfigMem { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(read_report(Path::new("/nonexistent/report.memreport")).is_err());
    }
}
