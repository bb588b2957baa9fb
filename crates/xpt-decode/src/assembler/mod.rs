//! Logical record reassembly.
//!
//! NAMESTR descriptors (136/140 bytes) and observation rows (any width) do
//! not line up with the 80-byte physical records. Each physical record is
//! appended to a [`RollingBuffer`]; an assembler then slices off complete
//! logical records and leaves any partial tail buffered for the next record.

mod namestr;
mod rows;

pub use namestr::NamestrAssembler;
pub use rows::RowAssembler;

/// Byte accumulator owned by a single decode pass.
///
/// Consumed bytes are only released on the next append, so slices returned
/// by [`RollingBuffer::pop`] stay valid until then.
#[derive(Debug, Default)]
pub struct RollingBuffer {
    bytes: Vec<u8>,
    head: usize,
}

impl RollingBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a physical record.
    pub fn append(&mut self, record: &[u8]) {
        if self.head > 0 {
            self.bytes.drain(..self.head);
            self.head = 0;
        }
        self.bytes.extend_from_slice(record);
    }

    /// Bytes buffered and not yet consumed.
    #[must_use]
    pub fn available(&self) -> usize {
        self.bytes.len() - self.head
    }

    /// Take exactly `len` bytes from the front, or nothing if fewer are
    /// buffered.
    pub fn pop(&mut self, len: usize) -> Option<&[u8]> {
        if self.available() < len {
            return None;
        }
        let start = self.head;
        self.head += len;
        Some(&self.bytes[start..self.head])
    }

    /// The buffered bytes not yet consumed.
    #[must_use]
    pub fn remainder(&self) -> &[u8] {
        &self.bytes[self.head..]
    }

    /// Discard everything.
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.head = 0;
    }
}
