pub mod configure;
pub mod decode;
pub mod inspect;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Read a report file as lines.
pub fn read_report(input: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read report from {}", input.display()))?;
    Ok(text.lines().map(str::to_string).collect())
}
