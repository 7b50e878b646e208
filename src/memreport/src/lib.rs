//! # memreport
//!
//! Decoder for line-oriented memory-diagnostics reports ("memreports")
//! emitted by a game engine's debug tooling.
//!
//! This library provides functionality to:
//! - Segment a raw report into its metadata header and named category blocks
//! - Decode each known category grammar into typed records and summaries
//!   (class usage, texture list, config memory, render target pool)
//! - Preserve recognized-but-unsupported and unknown categories as raw lines
//! - Collect soft diagnostics as values instead of swallowing them
//!
//! Decoding is pure and single-threaded: the same input always produces the
//! same [`DecodedReport`], so callers may cache or parallelize freely.
//!
//! ## Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let text = std::fs::read_to_string("Win64.memreport")?;
//! let report = memreport::decode(&text)?;
//!
//! println!("Platform: {:?}", report.metadata.get("Platform"));
//! for category in &report.categories {
//!     match &category.outcome {
//!         memreport::CategoryOutcome::Decoded(_) => {
//!             println!("{}: decoded ({})", category.key, category.kind.name())
//!         }
//!         memreport::CategoryOutcome::Failed(error) => {
//!             println!("{}: {}", category.key, error)
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod category;
pub mod class_usage;
pub mod config_mem;
pub mod error;
pub mod render_target;
pub mod report;
pub mod segment;
pub mod text;
pub mod texture;

// Re-export commonly used items
#[doc(inline)]
pub use category::{normalize_key, CategoryKind, CLASS_PREFIX};
#[doc(inline)]
pub use class_usage::{ClassSummary, ClassUsageRecord, ClassUsageTable};
#[doc(inline)]
pub use config_mem::ConfigMemEntry;
#[doc(inline)]
pub use error::{CategoryError, DecodeError, Warning};
#[doc(inline)]
pub use render_target::RenderTargetEntry;
#[doc(inline)]
pub use report::{
    decode, decode_lines, decode_lines_with_header, CategoryData, CategoryOutcome,
    DecodedCategory, DecodedReport,
};
#[doc(inline)]
pub use segment::{
    segment, segment_with_header, CategoryBlocks, ReportMetadata, Segmented, METADATA_LINES,
};
#[doc(inline)]
pub use texture::{TextureGroupTotals, TextureRecord, TextureSummary, TextureTable};
