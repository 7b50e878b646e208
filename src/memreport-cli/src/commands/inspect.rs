//! `memreport meta` and `memreport categories` - report introspection
//! without full decoding.

use std::path::Path;

use anyhow::Result;
use memreport::CategoryKind;

use crate::commands::read_report;
use crate::config::Config;

pub fn meta(input: &Path, json: bool) -> Result<()> {
    let config = Config::load()?;
    let lines = read_report(input)?;
    let segmented = memreport::segment(&lines)?;

    if json || config.prefers_json() {
        println!("{}", serde_json::to_string_pretty(&segmented.metadata)?);
        return Ok(());
    }

    let mut fields: Vec<(&String, &String)> = segmented.metadata.iter().collect();
    fields.sort();
    for (key, value) in fields {
        println!("{}: {}", key, value);
    }
    for warning in &segmented.warnings {
        println!("warning: {}", warning);
    }

    Ok(())
}

pub fn categories(input: &Path) -> Result<()> {
    let lines = read_report(input)?;
    let segmented = memreport::segment(&lines)?;

    for (key, block) in segmented.categories.iter() {
        let kind = CategoryKind::classify(key);
        println!("{} [{}]: {} lines", key, kind.name(), block.len());
    }

    Ok(())
}
