//! Error types for the slipnote library.

use std::io;
use thiserror::Error;

/// Result type alias for slipnote operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during slip note conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input bytes are not a readable DOCX container.
    #[error("unreadable document: {0}")]
    UnreadableDocument(String),

    /// The document decoded but holds no blocks to scan.
    #[error("document contains no extractable content")]
    ExtractionFailed,

    /// A reference suffix is empty or contains unsafe characters.
    #[error("invalid reference suffix: {0:?}")]
    InvalidSuffix(String),

    /// Template schema or document serialization failure.
    #[error("rendering error: {0}")]
    RenderFailed(String),

    /// The output archive could not be written.
    #[error("bundling error: {0}")]
    BundlingFailed(String),
}

impl Error {
    /// Whether this error was caused by caller input rather than an
    /// internal defect. The boundary maps client errors to "fix your
    /// input" responses and the rest to server-side failures.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::UnreadableDocument(_) | Error::ExtractionFailed | Error::InvalidSuffix(_)
        )
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::BundlingFailed(err.to_string())
    }
}
