//! Texture list grammar (`ListTextures` category).
//!
//! The block carries its own column schema on line 1 (line 0 is a
//! title/echo line). Two header variants exist, distinguished by the first
//! compound column:
//! ```text
//! MaxAllowedSize: Width x Height (Size in KB, Authored Bias), Current/InMem: Width x Height (Size in KB), Format, ...
//! Cooked/OnDisk: Width x Height (Size in KB, Authored Bias), Current/InMem: Width x Height (Size in KB), Format, ...
//! ```
//! The last 14 lines of the block are the summary region, matched
//! line-by-line against the `Total <Group> size:` grammar.
//!
//! Row values are stored as trimmed strings; interpreting the two compound
//! cells numerically is the consumer's job ([`dimensions`], [`size_kb`]),
//! because the compound grammar varies by source variant.

use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;

use crate::error::{CategoryError, Warning};
use crate::text::split_fields;

/// Number of trailing lines reserved for the summary region.
const SUMMARY_LINES: usize = 14;

/// Header pattern for the maximum-allowed-size variant.
const MAX_ALLOWED_PATTERN: &str = r"^(MaxAllowedSize: Width x Height \(Size in KB, Authored Bias\)), (Current/InMem: Width x Height \(Size in KB\)), (.*)";

/// Header pattern for the cooked/on-disk variant.
const COOKED_PATTERN: &str = r"^(Cooked/OnDisk: Width x Height \(Size in KB, Authored Bias\)), (Current/InMem: Width x Height \(Size in KB\)), (.*)";

/// Summary grammar: `Total <Group> size: InMem= <N> MB  OnDisk= <N> MB`
/// with an optional count pair.
const SUMMARY_PATTERN: &str = r"^Total (.+?) size: InMem= ([\d.]+ MB)  OnDisk= ([\d.]+ MB)(?:  Count=(\d+), CountApplicableToMin=(\d+))?";

/// One texture row; values align positionally with
/// [`TextureTable::columns`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextureRecord {
    pub values: Vec<String>,
}

/// Per-group totals from the summary region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextureGroupTotals {
    /// In-memory figure, kept verbatim (e.g. `123.45 MB`).
    pub in_mem: String,
    /// On-disk figure, kept verbatim.
    pub on_disk: String,
    pub count: Option<u64>,
    pub count_applicable_to_min: Option<u64>,
}

/// Group name to totals mapping.
pub type TextureSummary = BTreeMap<String, TextureGroupTotals>;

/// Decoded texture list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextureTable {
    /// Column schema discovered from the block's header line: the two
    /// compound columns followed by the scalar tail.
    pub columns: Vec<String>,
    pub records: Vec<TextureRecord>,
    pub summary: TextureSummary,
}

impl TextureTable {
    /// Index of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell of a row by column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.records.get(row)?.values.get(index).map(String::as_str)
    }
}

/// Parse one `ListTextures` block.
pub fn parse(lines: &[String]) -> Result<(TextureTable, Vec<Warning>), CategoryError> {
    let header = lines
        .get(1)
        .ok_or_else(|| CategoryError::UnknownTextureHeader(String::new()))?;
    let columns = parse_header(header)?;

    let mut records = Vec::new();
    let data_end = lines.len().saturating_sub(SUMMARY_LINES);
    for line in lines.iter().take(data_end).skip(2) {
        // Totals belong to the summary region; skip one that strays into
        // the data rows.
        if line.starts_with("Total ") {
            continue;
        }
        let fields = split_fields(line);
        let values = fields.into_iter().take(columns.len()).collect();
        records.push(TextureRecord { values });
    }

    let mut warnings = Vec::new();
    let summary = parse_summary(
        &lines[lines.len().saturating_sub(SUMMARY_LINES)..],
        &mut warnings,
    );

    Ok((
        TextureTable {
            columns,
            records,
            summary,
        },
        warnings,
    ))
}

/// Detect the header variant and derive the column list.
fn parse_header(header: &str) -> Result<Vec<String>, CategoryError> {
    let pattern = if header.contains("MaxAllowedSize:") {
        MAX_ALLOWED_PATTERN
    } else if header.contains("Cooked/OnDisk:") {
        COOKED_PATTERN
    } else {
        return Err(CategoryError::UnknownTextureHeader(header.to_string()));
    };

    let re = Regex::new(pattern).expect("header pattern compiles");
    let captures = re
        .captures(header)
        .ok_or_else(|| CategoryError::UnknownTextureHeader(header.to_string()))?;

    let mut columns = vec![captures[1].to_string(), captures[2].to_string()];
    columns.extend(captures[3].split(", ").map(str::to_string));
    Ok(columns)
}

/// Match each summary-region line against the totals grammar; lines that
/// do not match are soft warnings.
fn parse_summary(lines: &[String], warnings: &mut Vec<Warning>) -> TextureSummary {
    let re = Regex::new(SUMMARY_PATTERN).expect("summary pattern compiles");

    let mut summary = TextureSummary::new();
    for line in lines {
        match re.captures(line) {
            Some(captures) => {
                let group = captures[1].to_string();
                summary.insert(
                    group,
                    TextureGroupTotals {
                        in_mem: captures[2].to_string(),
                        on_disk: captures[3].to_string(),
                        count: captures.get(4).and_then(|m| m.as_str().parse().ok()),
                        count_applicable_to_min: captures
                            .get(5)
                            .and_then(|m| m.as_str().parse().ok()),
                    },
                );
            }
            None => {
                tracing::debug!(line = line.as_str(), "unmatched texture summary line");
                warnings.push(Warning::TextureSummaryLine {
                    line: line.to_string(),
                });
            }
        }
    }
    summary
}

/// Pixel dimensions of a compound cell like `2048x1024 (2730, bias 0)`.
///
/// Consumer-side interpretation; the parser itself never calls this.
pub fn dimensions(cell: &str) -> Option<(u32, u32)> {
    let lead = cell.split_whitespace().next()?;
    let (width, height) = lead.split_once('x')?;
    Some((width.trim().parse().ok()?, height.trim().parse().ok()?))
}

/// KB figure of a compound cell: the leading number inside the
/// parentheses. Consumer-side interpretation.
pub fn size_kb(cell: &str) -> Option<u64> {
    let inside = cell.split_once('(')?.1;
    let digits: String = inside
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_ALLOWED_HEADER: &str = "MaxAllowedSize: Width x Height (Size in KB, Authored Bias), Current/InMem: Width x Height (Size in KB), Format, LODGroup, Name, Streaming, UnknownRef, VT, Usage Count";

    fn sample() -> Vec<String> {
        let mut lines = vec![
            "Listing all textures.".to_string(),
            MAX_ALLOWED_HEADER.to_string(),
            "2048x2048 (21845 KB, 0), 1024x1024 (5461 KB), PF_DXT5, TEXTUREGROUP_World, /Game/Textures/T_Rock.T_Rock, YES, NO, NO, 3".to_string(),
            "512x512 (1365 KB, 1), 512x512 (1365 KB), PF_DXT1, TEXTUREGROUP_UI, /Game/UI/T_Icon.T_Icon, NO, NO, YES, 1".to_string(),
        ];
        // Summary region: 14 trailing lines, two of which match the grammar.
        // The groupless `Total size:` line does not fit the `.+?` group
        // capture and is reported as a warning.
        lines.push("Total size: InMem= 6.67 MB  OnDisk= 22.69 MB".to_string());
        lines.push(
            "Total PF_DXT5 size: InMem= 5.33 MB  OnDisk= 21.33 MB  Count=1, CountApplicableToMin=1"
                .to_string(),
        );
        lines.push("Total TEXTUREGROUP_World size: InMem= 5.33 MB  OnDisk= 21.33 MB".to_string());
        for i in 0..11 {
            lines.push(format!("unstructured trailer {}", i));
        }
        lines
    }

    #[test]
    fn test_header_variant_max_allowed() {
        let (table, _) = parse(&sample()).unwrap();
        assert_eq!(table.columns.len(), 9);
        assert_eq!(
            table.columns[0],
            "MaxAllowedSize: Width x Height (Size in KB, Authored Bias)"
        );
        assert_eq!(table.columns[1], "Current/InMem: Width x Height (Size in KB)");
        assert_eq!(
            &table.columns[2..],
            &[
                "Format",
                "LODGroup",
                "Name",
                "Streaming",
                "UnknownRef",
                "VT",
                "Usage Count"
            ]
            .map(String::from)
        );
    }

    #[test]
    fn test_rows_keep_parenthesized_commas_together() {
        let (table, _) = parse(&sample()).unwrap();
        assert_eq!(table.records.len(), 2);
        assert_eq!(
            table.cell(0, "MaxAllowedSize: Width x Height (Size in KB, Authored Bias)"),
            Some("2048x2048 (21845 KB, 0)")
        );
        assert_eq!(table.cell(0, "Format"), Some("PF_DXT5"));
        assert_eq!(table.cell(1, "VT"), Some("YES"));
    }

    #[test]
    fn test_summary_groups() {
        let (table, warnings) = parse(&sample()).unwrap();

        let dxt5 = &table.summary["PF_DXT5"];
        assert_eq!(dxt5.in_mem, "5.33 MB");
        assert_eq!(dxt5.on_disk, "21.33 MB");
        assert_eq!(dxt5.count, Some(1));
        assert_eq!(dxt5.count_applicable_to_min, Some(1));

        let world = &table.summary["TEXTUREGROUP_World"];
        assert_eq!(world.count, None);
        assert_eq!(world.count_applicable_to_min, None);

        // 11 filler lines plus the groupless `Total size:` line.
        assert_eq!(warnings.len(), 12);
        assert!(warnings
            .iter()
            .all(|w| matches!(w, Warning::TextureSummaryLine { .. })));
    }

    #[test]
    fn test_cooked_header_variant() {
        let mut lines = sample();
        lines[1] = lines[1].replace("MaxAllowedSize:", "Cooked/OnDisk:");
        let (table, _) = parse(&lines).unwrap();
        assert_eq!(
            table.columns[0],
            "Cooked/OnDisk: Width x Height (Size in KB, Authored Bias)"
        );
    }

    #[test]
    fn test_unknown_header_is_fatal() {
        let mut lines = sample();
        lines[1] = "Name, Size, Format".to_string();
        assert!(matches!(
            parse(&lines).unwrap_err(),
            CategoryError::UnknownTextureHeader(_)
        ));
    }

    #[test]
    fn test_stray_total_row_is_skipped() {
        let mut lines = sample();
        lines.insert(3, "Total something that is not a data row".to_string());
        let (table, _) = parse(&lines).unwrap();
        assert_eq!(table.records.len(), 2);
    }

    #[test]
    fn test_dimensions_and_size_helpers() {
        assert_eq!(dimensions("1920x1080 (2048, bias 0)"), Some((1920, 1080)));
        assert_eq!(dimensions("2048x2048 (21845 KB, 0)"), Some((2048, 2048)));
        assert_eq!(dimensions("no-cross"), None);
        assert_eq!(size_kb("1024x1024 (5461 KB)"), Some(5461));
        assert_eq!(size_kb("1920x1080 (2048, bias 0)"), Some(2048));
        assert_eq!(size_kb("plain"), None);
    }

    #[test]
    fn test_parse_is_pure() {
        let first = parse(&sample()).unwrap();
        let second = parse(&sample()).unwrap();
        assert_eq!(first, second);
    }
}
