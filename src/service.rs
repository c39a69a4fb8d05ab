//! Conversion orchestration: the one entry point the outside world
//! calls.

use chrono::{Local, NaiveDate};

use crate::bundle::{self, Bundle};
use crate::error::Result;
use crate::extract;
use crate::reader;
use crate::refs::{self, DEFAULT_PREFIX};
use crate::render::{self, RenderContext, Variant};

/// Runs one slip note through the full pipeline: read, extract,
/// compose references, render both variants, bundle.
///
/// The service holds no state across calls; each conversion is a
/// self-contained, fail-fast transaction.
///
/// # Example
///
/// ```no_run
/// use slipnote::ConversionService;
///
/// fn main() -> slipnote::Result<()> {
///     let data = std::fs::read("slip.docx")?;
///     let bundle = ConversionService::new().convert(&data, "2025-001", "2025-002")?;
///     std::fs::write(bundle.file_name(), &bundle.bytes)?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConversionService {
    prefix: String,
    issue_date: Option<NaiveDate>,
}

impl ConversionService {
    /// Create a service with the house reference prefix.
    pub fn new() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            issue_date: None,
        }
    }

    /// Override the reference prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Pin the issue date printed on the notes. Without this the
    /// current local date is used; pinning makes output reproducible.
    pub fn with_issue_date(mut self, date: NaiveDate) -> Self {
        self.issue_date = Some(date);
        self
    }

    /// Convert one slip note into the two-note bundle.
    ///
    /// Any stage failure aborts the whole conversion; retry policy
    /// belongs to the caller.
    pub fn convert(&self, data: &[u8], suffix_a: &str, suffix_b: &str) -> Result<Bundle> {
        let (ref_a, ref_b) = refs::compose_pair(&self.prefix, suffix_a, suffix_b)?;
        log::info!("converting slip note as {ref_a} / {ref_b}");

        let doc = reader::read_bytes(data)?;
        let fields = extract::extract(&doc)?;
        let issue_date = self
            .issue_date
            .unwrap_or_else(|| Local::now().date_naive());

        let note_a = render::render(
            &RenderContext {
                fields: &fields,
                reference: &ref_a,
                issue_date,
            },
            Variant::Client,
        )?;
        let note_b = render::render(
            &RenderContext {
                fields: &fields,
                reference: &ref_b,
                issue_date,
            },
            Variant::Reinsurer,
        )?;

        bundle::bundle(&note_a, &note_b)
    }
}

impl Default for ConversionService {
    fn default() -> Self {
        Self::new()
    }
}
