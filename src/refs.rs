//! Debit note reference identifiers.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed house prefix for generated debit note references.
pub const DEFAULT_PREFIX: &str = "DN-RHB";

/// A composed reference identifier of the form `<prefix>-<suffix>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceId(String);

impl ReferenceId {
    /// The full reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compose one reference from the house prefix and a user suffix.
///
/// Unsafe suffixes are rejected rather than silently stripped, so a
/// reference the broker did not type never reaches a document.
///
/// # Errors
///
/// Returns [`Error::InvalidSuffix`] when the suffix is empty or holds
/// characters outside alphanumeric, hyphen and underscore.
pub fn compose(prefix: &str, suffix: &str) -> Result<ReferenceId> {
    if !is_safe_suffix(suffix) {
        return Err(Error::InvalidSuffix(suffix.to_string()));
    }
    Ok(ReferenceId(format!("{prefix}-{suffix}")))
}

/// Compose the pair of variant references in one step.
///
/// The suffixes must differ; equal suffixes would give both archive
/// entries the same name, and one note would shadow the other on
/// extraction.
pub fn compose_pair(
    prefix: &str,
    suffix_a: &str,
    suffix_b: &str,
) -> Result<(ReferenceId, ReferenceId)> {
    if suffix_a == suffix_b {
        return Err(Error::InvalidSuffix(format!(
            "{suffix_a} (same suffix for both notes)"
        )));
    }
    Ok((compose(prefix, suffix_a)?, compose(prefix, suffix_b)?))
}

fn is_safe_suffix(suffix: &str) -> bool {
    !suffix.is_empty()
        && suffix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
