//! Decoded cell values.

use serde::Serialize;

/// A single decoded value at one (row, variable) position.
///
/// Numeric cells hold the IBM float exactly as decoded. SAS missing-value
/// sentinels are not special-cased, so a missing numeric shows up as the
/// double its bit pattern happens to encode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataCell {
    Numeric(f64),
    Character(String),
}

impl DataCell {
    /// The numeric value, if this is a numeric cell.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(value) => Some(*value),
            Self::Character(_) => None,
        }
    }

    /// The text value, if this is a character cell.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Numeric(_) => None,
            Self::Character(text) => Some(text),
        }
    }
}

impl std::fmt::Display for DataCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Character(text) => f.write_str(text),
        }
    }
}
