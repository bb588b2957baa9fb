//! Physical record source.
//!
//! An XPT file is a flat run of 80-byte records with no delimiters. The
//! source hands them out one at a time and tells a clean end of stream
//! (at a record boundary) apart from a truncated final record.

use std::io::{ErrorKind, Read};

use crate::error::{Result, XptError};

/// Physical record length in bytes.
pub const RECORD_LEN: usize = 80;

/// One physical record.
pub type Record = [u8; RECORD_LEN];

/// Reads fixed 80-byte records from any byte source.
pub struct RecordSource<R: Read> {
    reader: R,
    offset: u64,
}

impl<R: Read> RecordSource<R> {
    /// Wrap a reader. Buffering is the caller's choice.
    pub fn new(reader: R) -> Self {
        Self { reader, offset: 0 }
    }

    /// Byte offset of the next record.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read the next record.
    ///
    /// Returns `Ok(None)` when the stream ends exactly on a record boundary.
    ///
    /// # Errors
    ///
    /// [`XptError::TruncatedRecord`] if the stream ends after 1 to 79 bytes,
    /// or [`XptError::Io`] if the reader fails.
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        let mut record = [0u8; RECORD_LEN];
        let mut filled = 0usize;

        while filled < RECORD_LEN {
            match self.reader.read(&mut record[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(XptError::Io(e)),
            }
        }

        match filled {
            0 => Ok(None),
            RECORD_LEN => {
                self.offset += RECORD_LEN as u64;
                Ok(Some(record))
            }
            len => Err(XptError::TruncatedRecord {
                offset: self.offset,
                len,
            }),
        }
    }
}

impl<R: Read> Iterator for RecordSource<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
