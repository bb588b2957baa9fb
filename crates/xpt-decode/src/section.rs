//! Section classifier.
//!
//! Tracks which part of the file the decoder is in. Each physical record is
//! either one of five header markers, which moves the classifier to a new
//! section, or a data record that belongs to the current section.
//!
//! ```text
//! None ─LIBRARY→ Library ─MEMBER→ Member ─DSCRPTR→ Descriptor
//!      ─NAMESTR→ NameHeader ─OBS→ Observation ─MEMBER→ (end of member)
//! ```
//!
//! Any other header is rejected, as is data before the first header.

use std::fmt;

use serde::Serialize;

use crate::error::{Result, XptError};
use crate::header::{
    DSCRPTR_HEADER_PREFIX, LIBRARY_HEADER_PREFIX, MEMBER_HEADER_PREFIX, NAMESTR_HEADER_PREFIX,
    OBS_HEADER_PREFIX,
};

/// Section of the file the classifier is currently reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Section {
    /// No header seen yet.
    #[default]
    None,
    /// After the LIBRARY header.
    Library,
    /// After the MEMBER header.
    Member,
    /// After the DSCRPTR header.
    Descriptor,
    /// After the NAMESTR header.
    NameHeader,
    /// After the OBS header.
    Observation,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "NONE",
            Self::Library => "LIBRARY",
            Self::Member => "MEMBER",
            Self::Descriptor => "DSCRPTR",
            Self::NameHeader => "NAMESTR",
            Self::Observation => "OBS",
        };
        f.write_str(name)
    }
}

/// The five header markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeaderKind {
    Library,
    Member,
    Descriptor,
    Namestr,
    Observation,
}

impl HeaderKind {
    /// All markers, in file order.
    pub const ALL: [Self; 5] = [
        Self::Library,
        Self::Member,
        Self::Descriptor,
        Self::Namestr,
        Self::Observation,
    ];

    /// The 48-byte marker text that opens a header record.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Library => LIBRARY_HEADER_PREFIX,
            Self::Member => MEMBER_HEADER_PREFIX,
            Self::Descriptor => DSCRPTR_HEADER_PREFIX,
            Self::Namestr => NAMESTR_HEADER_PREFIX,
            Self::Observation => OBS_HEADER_PREFIX,
        }
    }
}

impl fmt::Display for HeaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Library => "LIBRARY",
            Self::Member => "MEMBER",
            Self::Descriptor => "DSCRPTR",
            Self::Namestr => "NAMESTR",
            Self::Observation => "OBS",
        };
        f.write_str(name)
    }
}

/// What a physical record is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Header(HeaderKind),
    Data,
}

impl RecordKind {
    /// Classify a physical record by the marker it contains.
    ///
    /// A marker matches byte for byte (case-sensitive) at any offset in the
    /// record.
    #[must_use]
    pub fn classify(record: &[u8]) -> Self {
        HeaderKind::ALL
            .into_iter()
            .find(|kind| contains(record, kind.marker().as_bytes()))
            .map_or(Self::Data, Self::Header)
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Outcome of feeding one record to the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A header moved the classifier into a new section. The header record
    /// itself is consumed.
    Enter(Section),
    /// A data record for the handler of the given section.
    Route(Section),
    /// A MEMBER header after observations: the first member is complete.
    EndOfMember,
}

impl Section {
    /// Advance the state machine by one record.
    ///
    /// Total over every (section, record kind) pair.
    ///
    /// # Errors
    ///
    /// [`XptError::MissingHeader`] for data before any header, and
    /// [`XptError::UnexpectedHeader`] for a header out of order.
    pub fn transition(self, kind: RecordKind) -> Result<Transition> {
        use HeaderKind as H;

        match (self, kind) {
            (Self::None, RecordKind::Data) => Err(XptError::missing_header("LIBRARY HEADER")),
            (section, RecordKind::Data) => Ok(Transition::Route(section)),

            (Self::None, RecordKind::Header(H::Library)) => Ok(Transition::Enter(Self::Library)),
            (Self::Library, RecordKind::Header(H::Member)) => Ok(Transition::Enter(Self::Member)),
            (Self::Member, RecordKind::Header(H::Descriptor)) => {
                Ok(Transition::Enter(Self::Descriptor))
            }
            (Self::Descriptor, RecordKind::Header(H::Namestr)) => {
                Ok(Transition::Enter(Self::NameHeader))
            }
            (Self::NameHeader, RecordKind::Header(H::Observation)) => {
                Ok(Transition::Enter(Self::Observation))
            }
            (Self::Observation, RecordKind::Header(H::Member)) => Ok(Transition::EndOfMember),

            (section, RecordKind::Header(header)) => {
                Err(XptError::UnexpectedHeader { section, header })
            }
        }
    }
}
