//! Class-usage table grammar (`class=<Name>` categories).
//!
//! Block shape, after the two echo/formatting lines the engine prints:
//! ```text
//!  Object                                 NumKB   MaxKB ResExcKB ...
//!  StaticMesh /Game/Maps/Arena.Floor    1234.00 1300.00   500.00 ...
//!  ...
//!                          Class Count  NumKB  MaxKB ...
//! 2 Objects (Total: 1.49M / Max: 1.60M / Res: 0.62M | ResDedSys: 0.00M / ...)
//! ```
//!
//! Rows are detected by the class name appearing in the line; the column
//! schema is discovered from the block itself. All KB figures are converted
//! to MB with ceiling rounding so memory is never under-reported, and the
//! emitted column names are renamed to match.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::category::CLASS_PREFIX;
use crate::error::CategoryError;
use crate::text::{kb_to_mb_ceil, path_tail};

/// Column name that holds the object identifier instead of a metric.
const OBJECT_COLUMN: &str = "Object";

/// One live object row from a class-usage block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassUsageRecord {
    /// Last path segment of the object identifier.
    pub object: String,
    /// Megabyte metrics, positionally aligned with the non-`Object`
    /// columns of [`ClassUsageTable::columns`].
    pub metrics: Vec<f64>,
}

/// Footer totals of a class-usage block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassSummary {
    /// Leading object count of the footer line.
    pub objects: u64,
    /// Named totals with the `M` unit suffix stripped.
    pub totals: BTreeMap<String, f64>,
}

/// Decoded class-usage table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassUsageTable {
    /// Class name (the category key minus its `class=` prefix).
    pub class_name: String,
    /// Discovered column schema, `KB` names rewritten to `MB`.
    pub columns: Vec<String>,
    pub records: Vec<ClassUsageRecord>,
    pub summary: ClassSummary,
}

/// Parse one `class=<Name>` block.
pub fn parse(lines: &[String], category_key: &str) -> Result<ClassUsageTable, CategoryError> {
    let class_name = category_key
        .strip_prefix(CLASS_PREFIX)
        .unwrap_or(category_key);

    // Discovered names keep their raw `KB` spelling while parsing; the
    // emitted schema is renamed at the end.
    let mut columns: Vec<String> = Vec::new();
    let mut records = Vec::new();

    let body_end = lines.len().saturating_sub(1);
    for line in lines.iter().take(body_end).skip(2) {
        if line.contains(class_name) {
            if columns.is_empty() {
                return Err(CategoryError::MissingSchema);
            }
            records.push(parse_row(line, &columns)?);
        } else {
            if line.contains("Class") && line.contains("Count") {
                break;
            }
            if columns.is_empty() {
                columns = line.split_whitespace().map(str::to_string).collect();
            }
        }
    }

    if columns.is_empty() {
        return Err(CategoryError::MissingSchema);
    }

    let summary_line = lines
        .last()
        .ok_or(CategoryError::MissingSchema)?;
    let summary = parse_summary(summary_line)?;

    Ok(ClassUsageTable {
        class_name: class_name.to_string(),
        columns: columns.iter().map(|c| c.replace("KB", "MB")).collect(),
        records,
        summary,
    })
}

/// Tokenize a data row and zip it positionally against the schema.
///
/// The first token is the class marker column and is dropped; surplus
/// trailing tokens are ignored, a shortfall is an error.
fn parse_row(line: &str, columns: &[String]) -> Result<ClassUsageRecord, CategoryError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < columns.len() + 1 {
        return Err(CategoryError::MalformedRow(line.to_string()));
    }

    let mut object = String::new();
    let mut metrics = Vec::new();
    for (column, token) in columns.iter().zip(&tokens[1..]) {
        if column == OBJECT_COLUMN {
            object = path_tail(token).to_string();
        } else {
            let kb: f64 = token
                .parse()
                .map_err(|_| CategoryError::MalformedRow(line.to_string()))?;
            metrics.push(kb_to_mb_ceil(kb));
        }
    }

    Ok(ClassUsageRecord { object, metrics })
}

/// Parse the footer line.
///
/// Grammar: a leading object count, then a parenthesized list of
/// `/`-separated `Name: Value` entries. A value containing `|` packs a
/// second metric whose value is the entry's last `:`-part. Values carry an
/// `M` unit suffix and the final entry a closing `)`.
fn parse_summary(line: &str) -> Result<ClassSummary, CategoryError> {
    let malformed = || CategoryError::MalformedSummary(line.to_string());

    let objects: u64 = line
        .split_whitespace()
        .next()
        .ok_or_else(malformed)?
        .parse()
        .map_err(|_| malformed())?;

    let (_, entries) = line.split_once('(').ok_or_else(malformed)?;

    let mut totals = BTreeMap::new();
    for entry in entries.split('/') {
        let parts: Vec<&str> = entry.split(':').collect();
        if parts.len() < 2 {
            return Err(malformed());
        }
        let name = parts[0].trim();
        let mut value = parts[1].trim();

        if let Some((left, right)) = value.split_once('|') {
            let packed_name = right.split(':').next().unwrap_or("").trim();
            let packed_value = parts.last().unwrap_or(&"");
            totals.insert(
                packed_name.to_string(),
                numeric(packed_value).ok_or_else(malformed)?,
            );
            value = left.trim();
        }

        totals.insert(name.to_string(), numeric(value).ok_or_else(malformed)?);
    }

    Ok(ClassSummary { objects, totals })
}

/// Strip the trailing `)` and `M` unit suffix and parse as float.
fn numeric(value: &str) -> Option<f64> {
    value
        .trim()
        .trim_end_matches(')')
        .trim_end_matches('M')
        .trim()
        .parse()
        .ok()
}
