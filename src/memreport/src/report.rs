//! Decode driver and the aggregate report document.
//!
//! Segmentation runs first; every category block is then dispatched to its
//! grammar. A category that fails its grammar is reported as a failed
//! outcome without aborting the rest of the decode, so callers can still
//! present whatever did parse.
//!
//! Decoding is referentially pure: the same input lines produce an
//! identical [`DecodedReport`] every time, so external caching keyed on
//! document content is safe.

use serde::Serialize;

use crate::category::CategoryKind;
use crate::class_usage::{self, ClassUsageTable};
use crate::config_mem::{self, ConfigMemEntry};
use crate::error::{CategoryError, DecodeError, Warning};
use crate::render_target::{self, RenderTargetEntry};
use crate::segment::{segment_with_header, ReportMetadata, METADATA_LINES};
use crate::texture::{self, TextureTable};

/// Decoded payload of a single category block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum CategoryData {
    ClassUsage(ClassUsageTable),
    TextureList(TextureTable),
    ConfigMem { entries: Vec<ConfigMemEntry> },
    RenderTargetPool { entries: Vec<RenderTargetEntry> },
    /// Recognized category with no grammar yet; raw lines preserved.
    NotYetSupported { lines: Vec<String> },
    /// Unknown category; raw lines preserved.
    Unrecognized { lines: Vec<String> },
}

/// Outcome of decoding one category: a typed payload or a scoped failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CategoryOutcome {
    Decoded(CategoryData),
    Failed(CategoryError),
}

/// One category of the report, keyed by its canonical category key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedCategory {
    pub key: String,
    pub kind: CategoryKind,
    pub outcome: CategoryOutcome,
    /// Soft diagnostics raised while parsing this block.
    pub warnings: Vec<Warning>,
}

impl DecodedCategory {
    /// The decoded payload, if the category parsed.
    pub fn data(&self) -> Option<&CategoryData> {
        match &self.outcome {
            CategoryOutcome::Decoded(data) => Some(data),
            CategoryOutcome::Failed(_) => None,
        }
    }

    /// The scoped error, if the category failed.
    pub fn error(&self) -> Option<&CategoryError> {
        match &self.outcome {
            CategoryOutcome::Decoded(_) => None,
            CategoryOutcome::Failed(error) => Some(error),
        }
    }
}

/// Fully decoded report: header metadata plus one outcome per category,
/// in order of first appearance. Immutable after construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecodedReport {
    pub metadata: ReportMetadata,
    pub categories: Vec<DecodedCategory>,
    /// Segmentation-level diagnostics (header lines, markers).
    pub warnings: Vec<Warning>,
}

impl DecodedReport {
    /// Look up a category by canonical key.
    pub fn category(&self, key: &str) -> Option<&DecodedCategory> {
        self.categories.iter().find(|c| c.key == key)
    }
}

/// Decode a full report document.
pub fn decode(text: &str) -> Result<DecodedReport, DecodeError> {
    let lines: Vec<&str> = text.lines().collect();
    decode_lines(&lines)
}

/// Decode a report already split into lines.
pub fn decode_lines<S: AsRef<str>>(lines: &[S]) -> Result<DecodedReport, DecodeError> {
    decode_lines_with_header(lines, METADATA_LINES)
}

/// [`decode_lines`] with an explicit metadata header length.
pub fn decode_lines_with_header<S: AsRef<str>>(
    lines: &[S],
    header_lines: usize,
) -> Result<DecodedReport, DecodeError> {
    let segmented = segment_with_header(lines, header_lines)?;

    let mut categories = Vec::with_capacity(segmented.categories.len());
    for (key, block) in segmented.categories.iter() {
        categories.push(decode_category(key, block));
    }

    Ok(DecodedReport {
        metadata: segmented.metadata,
        categories,
        warnings: segmented.warnings,
    })
}

fn decode_category(key: &str, lines: &[String]) -> DecodedCategory {
    let kind = CategoryKind::classify(key);
    tracing::debug!(key, kind = kind.name(), lines = lines.len(), "decoding category");

    let mut warnings = Vec::new();
    let outcome = match kind {
        CategoryKind::ClassUsage => match class_usage::parse(lines, key) {
            Ok(table) => CategoryOutcome::Decoded(CategoryData::ClassUsage(table)),
            Err(error) => failed(key, error),
        },
        CategoryKind::TextureList => match texture::parse(lines) {
            Ok((table, texture_warnings)) => {
                warnings = texture_warnings;
                CategoryOutcome::Decoded(CategoryData::TextureList(table))
            }
            Err(error) => failed(key, error),
        },
        CategoryKind::ConfigMem => match config_mem::parse(lines) {
            Ok(entries) => CategoryOutcome::Decoded(CategoryData::ConfigMem { entries }),
            Err(error) => failed(key, error),
        },
        CategoryKind::RenderTargetPool => {
            let (entries, pool_warnings) = render_target::parse(lines);
            warnings = pool_warnings;
            CategoryOutcome::Decoded(CategoryData::RenderTargetPool { entries })
        }
        CategoryKind::NotYetSupported => CategoryOutcome::Decoded(CategoryData::NotYetSupported {
            lines: lines.to_vec(),
        }),
        CategoryKind::Unrecognized => CategoryOutcome::Decoded(CategoryData::Unrecognized {
            lines: lines.to_vec(),
        }),
    };

    DecodedCategory {
        key: key.to_string(),
        kind,
        outcome,
        warnings,
    }
}

fn failed(key: &str, error: CategoryError) -> CategoryOutcome {
    tracing::warn!(key, %error, "category failed to decode");
    CategoryOutcome::Failed(error)
}
