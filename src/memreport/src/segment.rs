//! Report segmentation.
//!
//! First stage of decoding: a single forward pass that splits the raw line
//! sequence into the metadata header and one block of raw lines per
//! category command, keyed by the canonical category key.
//!
//! Document shape:
//! ```text
//! Platform: Win64
//! ... 6 more `Key: value` header lines ...
//!
//! MemReport: Begin command "ListTextures -alphasort"
//! <body lines>
//! MemReport: End command
//! ```
//!
//! Every non-blank line strictly between a begin marker and its matching
//! end marker lands in exactly one block; marker lines themselves are never
//! stored as data.

use std::collections::HashMap;

use crate::category::normalize_key;
use crate::error::{DecodeError, Warning};

/// Number of metadata lines at the top of a report (engine convention).
pub const METADATA_LINES: usize = 7;

/// Literal marker opening a category command block.
pub const BEGIN_MARKER: &str = "MemReport: Begin command";

/// Literal marker closing the open category command block.
pub const END_MARKER: &str = "MemReport: End command";

/// Report header fields (`Platform`, `Time Since Boot`, ...).
pub type ReportMetadata = HashMap<String, String>;

/// Category blocks in order of first appearance.
///
/// Repeated commands with the same canonical key append to the existing
/// block instead of replacing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBlocks {
    order: Vec<String>,
    blocks: HashMap<String, Vec<String>>,
}

impl CategoryBlocks {
    fn append(&mut self, key: &str, line: &str) {
        if !self.blocks.contains_key(key) {
            self.order.push(key.to_string());
        }
        self.blocks
            .entry(key.to_string())
            .or_default()
            .push(line.to_string());
    }

    /// Raw body lines of a category, if it occurred in the report.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.blocks.get(key).map(Vec::as_slice)
    }

    /// Canonical keys in order of first appearance.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Iterate blocks in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.order
            .iter()
            .map(|key| (key.as_str(), self.blocks[key].as_slice()))
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no category produced any body line.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total number of body lines across all categories.
    pub fn line_count(&self) -> usize {
        self.blocks.values().map(Vec::len).sum()
    }
}

/// Output of [`segment`]: header metadata, category blocks, and the soft
/// diagnostics raised along the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segmented {
    pub metadata: ReportMetadata,
    pub categories: CategoryBlocks,
    pub warnings: Vec<Warning>,
}

/// Split a report into its metadata header and category blocks, reading
/// the first [`METADATA_LINES`] lines as the header.
pub fn segment<S: AsRef<str>>(lines: &[S]) -> Result<Segmented, DecodeError> {
    segment_with_header(lines, METADATA_LINES)
}

/// [`segment`] with an explicit header length, for dumps that deviate from
/// the engine convention.
pub fn segment_with_header<S: AsRef<str>>(
    lines: &[S],
    header_lines: usize,
) -> Result<Segmented, DecodeError> {
    if lines.is_empty() {
        return Err(DecodeError::NoData);
    }

    let mut metadata = ReportMetadata::new();
    let mut warnings = Vec::new();

    for line in lines.iter().take(header_lines) {
        let line = line.as_ref();
        match line.split_once(':') {
            Some((key, value)) => {
                metadata.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => {
                tracing::warn!(line, "metadata line is not `Key: value`");
                warnings.push(Warning::Metadata {
                    line: line.to_string(),
                });
            }
        }
    }

    let mut categories = CategoryBlocks::default();
    let mut open: Option<String> = None;

    for line in lines.iter().skip(header_lines) {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with(END_MARKER) {
            open = None;
            continue;
        }

        if let Some(key) = &open {
            categories.append(key, line);
            continue;
        }

        if line.starts_with(BEGIN_MARKER) {
            match quoted_identifier(line) {
                Some(raw) => open = Some(normalize_key(raw)),
                None => {
                    tracing::warn!(line, "begin marker without a quoted identifier");
                    warnings.push(Warning::UnquotedBeginMarker {
                        line: line.to_string(),
                    });
                }
            }
        }
        // Anything else outside an open block is dead input; well-formed
        // reports do not produce it, but it must not abort the decode.
    }

    Ok(Segmented {
        metadata,
        categories,
        warnings,
    })
}

/// First double-quoted substring of a marker line.
fn quoted_identifier(line: &str) -> Option<&str> {
    let mut parts = line.splitn(3, '"');
    parts.next()?;
    parts.next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_report(categories: &[(&str, &[&str])]) -> Vec<String> {
        let mut lines = vec![
            "CommandLine Options: -log".to_string(),
            "Platform: Win64".to_string(),
            "Time Since Boot: 92.41 Seconds".to_string(),
            "Build: ++Game+Main-CL-1024".to_string(),
            "Engine Version: 5.3.2".to_string(),
            "Net Mode: Standalone".to_string(),
            "Memory Stats:".to_string(),
        ];
        for (name, body) in categories {
            lines.push(String::new());
            lines.push(format!("MemReport: Begin command \"{}\"", name));
            lines.extend(body.iter().map(|l| l.to_string()));
            lines.push("MemReport: End command".to_string());
        }
        lines
    }

    #[test]
    fn test_empty_input_is_no_data() {
        let lines: Vec<String> = Vec::new();
        assert_eq!(segment(&lines).unwrap_err(), DecodeError::NoData);
    }

    #[test]
    fn test_metadata_and_single_block() {
        let lines = make_report(&[("ConfigMem", &["a", "b", "c"])]);
        let segmented = segment(&lines).unwrap();

        assert_eq!(segmented.metadata["Platform"], "Win64");
        assert_eq!(segmented.metadata["Time Since Boot"], "92.41 Seconds");
        // `Memory Stats:` splits into a key with an empty value.
        assert_eq!(segmented.metadata["Memory Stats"], "");
        assert!(segmented.warnings.is_empty());

        assert_eq!(segmented.categories.len(), 1);
        assert_eq!(
            segmented.categories.get("ConfigMem").unwrap(),
            &["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_malformed_metadata_line_is_a_warning() {
        let mut lines = make_report(&[]);
        lines[3] = "no separator here".to_string();
        let segmented = segment(&lines).unwrap();

        assert_eq!(
            segmented.warnings,
            vec![Warning::Metadata {
                line: "no separator here".to_string()
            }]
        );
        assert!(segmented.metadata.contains_key("Platform"));
    }

    #[test]
    fn test_key_normalization_at_segmentation() {
        let lines = make_report(&[
            ("ListTextures -alphasort", &["t"]),
            ("obj list class=StaticMesh -alphasort", &["s"]),
        ]);
        let segmented = segment(&lines).unwrap();

        let keys: Vec<&str> = segmented.categories.keys().collect();
        assert_eq!(keys, vec!["ListTextures", "class=StaticMesh"]);
    }

    #[test]
    fn test_same_key_accumulates_by_append() {
        let lines = make_report(&[
            ("ConfigMem", &["first"]),
            ("ConfigMem", &["second"]),
        ]);
        let segmented = segment(&lines).unwrap();

        assert_eq!(segmented.categories.len(), 1);
        assert_eq!(
            segmented.categories.get("ConfigMem").unwrap(),
            &["first".to_string(), "second".to_string()]
        );
    }

    #[test]
    fn test_completeness_no_line_dropped_or_duplicated() {
        let bodies: [(&str, &[&str]); 3] = [
            ("ConfigMem", &["a", "b"]),
            ("ListTextures", &["c", "d", "e"]),
            ("r.DumpRenderTargetPoolMemory", &["f"]),
        ];
        let lines = make_report(&bodies);
        let segmented = segment(&lines).unwrap();

        let expected: usize = bodies.iter().map(|(_, b)| b.len()).sum();
        assert_eq!(segmented.categories.line_count(), expected);
    }

    #[test]
    fn test_blank_lines_and_stray_lines_are_ignored() {
        let mut lines = make_report(&[("ConfigMem", &["a"])]);
        lines.push("stray line after last end marker".to_string());
        lines.push("   ".to_string());
        let segmented = segment(&lines).unwrap();

        assert_eq!(segmented.categories.line_count(), 1);
    }

    #[test]
    fn test_begin_marker_without_quotes_is_a_warning() {
        let mut lines = make_report(&[]);
        lines.push("MemReport: Begin command with no identifier".to_string());
        lines.push("orphan body line".to_string());
        let segmented = segment(&lines).unwrap();

        assert!(segmented.categories.is_empty());
        assert_eq!(
            segmented.warnings,
            vec![Warning::UnquotedBeginMarker {
                line: "MemReport: Begin command with no identifier".to_string()
            }]
        );
    }

    #[test]
    fn test_marker_lines_are_not_stored_as_data() {
        let lines = make_report(&[("ConfigMem", &["only"])]);
        let segmented = segment(&lines).unwrap();
        let block = segmented.categories.get("ConfigMem").unwrap();
        assert!(block.iter().all(|l| !l.starts_with("MemReport:")));
    }
}
