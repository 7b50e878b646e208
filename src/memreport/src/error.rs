//! Error and diagnostic types for report decoding.
//!
//! Two severities exist: document-level errors abort the whole decode,
//! category-level errors fail one block while the rest of the report still
//! decodes. Everything softer is a [`Warning`], collected as a value on the
//! decoded result so callers (and tests) can inspect it.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Fatal, document-level decode failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The input document had no lines at all.
    #[error("no data from report provided")]
    NoData,
}

/// Fatal failure scoped to a single category block.
///
/// A failed category does not abort the decode; the error is reported
/// alongside the categories that did parse.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum CategoryError {
    /// No column header line was found before the data rows.
    #[error("no column header line found before the data rows")]
    MissingSchema,

    /// The trailing summary line is absent or does not fit its grammar.
    #[error("summary line missing or malformed: {0}")]
    MalformedSummary(String),

    /// A data row does not fit the discovered column schema.
    #[error("data row does not fit the column schema: {0}")]
    MalformedRow(String),

    /// The texture header matches none of the known layouts.
    #[error("texture header matches no known layout: {0}")]
    UnknownTextureHeader(String),

    /// A config-memory line is not `<file> <bytes> <max bytes>`.
    #[error("config memory line is not `<file> <bytes> <max bytes>`: {0}")]
    MalformedConfigLine(String),
}

/// Soft diagnostic raised during decoding; never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Warning {
    /// Metadata header line without a `Key: value` shape.
    Metadata { line: String },
    /// Begin-command marker without a quoted identifier.
    UnquotedBeginMarker { line: String },
    /// Render-target pool line that did not match the entry pattern.
    RenderTargetLine { line: String },
    /// Texture summary line that did not match the totals pattern.
    TextureSummaryLine { line: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::Metadata { line } => {
                write!(f, "metadata line is not `Key: value`: {}", line)
            }
            Warning::UnquotedBeginMarker { line } => {
                write!(f, "begin marker without a quoted identifier: {}", line)
            }
            Warning::RenderTargetLine { line } => {
                write!(f, "render target line did not match the entry pattern: {}", line)
            }
            Warning::TextureSummaryLine { line } => {
                write!(f, "texture summary line did not match the totals pattern: {}", line)
            }
        }
    }
}
