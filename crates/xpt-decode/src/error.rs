//! Error types for XPT decoding.

use std::path::PathBuf;
use thiserror::Error;

use crate::section::{HeaderKind, Section};
use crate::types::Dataset;

/// Errors that can occur while decoding an XPT file.
#[derive(Debug, Error)]
pub enum XptError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The stream ended in the middle of an 80-byte physical record.
    #[error("truncated record at offset {offset}: got {len} of 80 bytes")]
    TruncatedRecord { offset: u64, len: usize },

    /// A required header record was never seen.
    #[error("missing header: expected {expected}")]
    MissingHeader { expected: &'static str },

    /// A header marker appeared where the current section does not allow it.
    #[error("unexpected {header} header while in {section} section")]
    UnexpectedHeader {
        section: Section,
        header: HeaderKind,
    },

    /// A fixed-position ASCII numeric field did not contain digits.
    #[error("failed to parse numeric field {field}: {text:?}")]
    NumericParse { field: &'static str, text: String },

    /// IBM float decode called with a slice that is not 8 bytes wide.
    #[error("IBM float must be 8 bytes, got {len}")]
    FloatWidth { len: usize },

    /// Invalid NAMESTR record.
    #[error("invalid NAMESTR at index {index}: {message}")]
    InvalidNamestr { index: usize, message: String },

    /// Parsed descriptor count differs from the NAMESTR header's count.
    #[error("NAMESTR header declared {declared} variables, parsed {parsed}")]
    VariableCountMismatch { declared: usize, parsed: usize },

    /// Observation data overflow.
    #[error("observation length overflow")]
    ObservationOverflow,

    /// Non-blank bytes left over after the last complete row.
    #[error("unexpected {len} trailing bytes in observations")]
    TrailingBytes { len: usize },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for XPT operations.
pub type Result<T> = std::result::Result<T, XptError>;

impl XptError {
    /// Create a MissingHeader error.
    pub fn missing_header(expected: &'static str) -> Self {
        Self::MissingHeader { expected }
    }

    /// Create a NumericParse error from the raw field bytes.
    pub fn numeric_parse(field: &'static str, raw: &[u8]) -> Self {
        Self::NumericParse {
            field,
            text: String::from_utf8_lossy(raw).into_owned(),
        }
    }

    /// Create an InvalidNamestr error.
    pub fn invalid_namestr(index: usize, message: impl Into<String>) -> Self {
        Self::InvalidNamestr {
            index,
            message: message.into(),
        }
    }
}

/// A decode pass that stopped on an error.
///
/// Carries the dataset as far as it was built so callers can still inspect
/// the variables and rows decoded before the failure.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct PartialDecode {
    /// The error that aborted the pass.
    #[source]
    pub error: XptError,
    /// Everything decoded before the error.
    pub dataset: Box<Dataset>,
}

impl From<PartialDecode> for XptError {
    fn from(partial: PartialDecode) -> Self {
        partial.error
    }
}
