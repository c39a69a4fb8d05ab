//! # slipnote
//!
//! Reinsurance slip note extraction and debit note generation.
//!
//! This library converts one broker-authored DOCX "slip note" into two
//! differently formatted DOCX "debit notes", one for the client and one
//! for the reinsurer, bundled into a single ZIP archive. Slip notes
//! are semi-structured documents authored by humans, so the core of the
//! crate is a label-driven, best-effort field extractor: fields that
//! cannot be located degrade to visible placeholders instead of
//! failing the conversion.
//!
//! ## Quick Start
//!
//! ```no_run
//! use slipnote::ConversionService;
//!
//! fn main() -> slipnote::Result<()> {
//!     let data = std::fs::read("slip.docx")?;
//!     let bundle = ConversionService::new().convert(&data, "2025-001", "2025-002")?;
//!     std::fs::write(bundle.file_name(), &bundle.bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - [`reader`]: decode DOCX bytes into ordered paragraph/table blocks
//! - [`extract`]: resolve the contract fields through ordered,
//!   label-table-driven strategies
//! - [`refs`]: compose the two `DN-RHB-<suffix>` reference identifiers
//! - [`render`]: substitute the record into the two variant schemas
//! - [`bundle`]: package both notes into a deterministic archive

pub mod bundle;
pub mod error;
pub mod extract;
pub mod model;
pub mod reader;
pub mod refs;
pub mod render;
pub mod service;

// Re-export commonly used types
pub use bundle::Bundle;
pub use error::{Error, Result};
pub use model::{
    Address, Block, ContractFields, FieldValue, Money, Percent, RawDocument, Table, TableRow,
    PLACEHOLDER,
};
pub use refs::{ReferenceId, DEFAULT_PREFIX};
pub use render::{RenderedDocument, Variant};
pub use service::ConversionService;

use std::path::Path;

/// Convert a slip note held in memory, returning the archive bytes.
///
/// Uses the default reference prefix and today's date; use
/// [`ConversionService`] directly for more control.
pub fn convert_bytes(data: &[u8], suffix_a: &str, suffix_b: &str) -> Result<Vec<u8>> {
    let bundle = ConversionService::new().convert(data, suffix_a, suffix_b)?;
    Ok(bundle.bytes)
}

/// Convert a slip note file, returning the bundle.
///
/// # Example
///
/// ```no_run
/// use slipnote::convert_file;
///
/// let bundle = convert_file("slip.docx", "2025-001", "2025-002").unwrap();
/// std::fs::write(bundle.file_name(), &bundle.bytes).unwrap();
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P, suffix_a: &str, suffix_b: &str) -> Result<Bundle> {
    let data = std::fs::read(path)?;
    ConversionService::new().convert(&data, suffix_a, suffix_b)
}

/// Extract the contract fields from a slip note without rendering.
///
/// Useful for inspecting what the extractor recovered, e.g. from the
/// CLI's `--fields-json` flag.
pub fn extract_fields(data: &[u8]) -> Result<ContractFields> {
    let doc = reader::read_bytes(data)?;
    extract::extract(&doc)
}
