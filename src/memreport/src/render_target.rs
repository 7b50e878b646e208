//! Render-target-pool grammar (`r.DumpRenderTargetPoolMemory` category).
//!
//! Pool dump lines have a fixed shape:
//! ```text
//!   12.50MB 2048x2048        1mip(s) SceneColorDeferred (PF_FloatRGBA) Unused frames: 2
//!    4.00MB  512x512x64      1mip(s) VolumetricFog (PF_R16F) Unused frames: 0
//! ```
//! The dump also contains non-entry lines (pool totals, spacing); those
//! are skipped and reported as soft warnings.

use regex::Regex;
use serde::Serialize;

use crate::error::Warning;

/// Entry pattern: size, 2-3 `x`-separated dimensions, mip count, free-text
/// name, parenthesized format, unused-frames trailer.
const ENTRY_PATTERN: &str = r"^\s*(\d+\.\d+MB)\s+(\d+x\s*\d+(?:x\s*\d+)?)\s+(\dmip\(s\))\s+([^\(]+)\s+\(([^)]+)\)\s+(Unused frames:\s*\d+)";

/// One pooled render target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderTargetEntry {
    pub name: String,
    pub size_mb: f64,
    /// Two or three dimensions; volume targets carry a depth.
    pub dimensions: Vec<u32>,
    pub mips: String,
    pub format: String,
    pub unused_frames: String,
}

/// Parse one pool dump block. Non-matching lines are never fatal.
pub fn parse(lines: &[String]) -> (Vec<RenderTargetEntry>, Vec<Warning>) {
    let re = Regex::new(ENTRY_PATTERN).expect("entry pattern compiles");

    let mut entries = Vec::new();
    let mut warnings = Vec::new();

    let end = lines.len().saturating_sub(3);
    for line in lines.iter().take(end).skip(1) {
        let Some(captures) = re.captures(line) else {
            tracing::debug!(line = line.as_str(), "unmatched render target line");
            warnings.push(Warning::RenderTargetLine {
                line: line.to_string(),
            });
            continue;
        };

        let size: Result<f64, _> = captures[1].trim_end_matches("MB").parse();
        let dimensions: Result<Vec<u32>, _> = captures[2]
            .replace(' ', "")
            .split('x')
            .map(str::parse)
            .collect();
        let (Ok(size_mb), Ok(dimensions)) = (size, dimensions) else {
            warnings.push(Warning::RenderTargetLine {
                line: line.to_string(),
            });
            continue;
        };

        entries.push(RenderTargetEntry {
            name: captures[4].trim().to_string(),
            size_mb,
            dimensions,
            mips: captures[3].to_string(),
            format: captures[5].to_string(),
            unused_frames: captures[6].to_string(),
        });
    }

    (entries, warnings)
}
