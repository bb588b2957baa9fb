//! Observation row reassembly.

use tracing::{debug, trace, warn};

use super::RollingBuffer;
use crate::error::{Result, XptError};
use crate::float::ibm_slice_to_ieee;
use crate::record::RECORD_LEN;
use crate::types::{DataCell, Variable, VariableType};

/// Cuts observation rows out of the OBS section and splits them into cells.
///
/// The last physical record is padded with blanks, which can look like one
/// or more all-blank rows. Such rows are held back until a non-blank row
/// follows them or the section ends; see [`RowAssembler::finish`].
#[derive(Debug, Clone)]
pub struct RowAssembler {
    row_width: usize,
    trim_strings: bool,
    pending_blank_rows: usize,
    rows: usize,
}

impl RowAssembler {
    /// Prepare for rows made of `variables`, in declared order.
    ///
    /// # Errors
    ///
    /// [`XptError::ObservationOverflow`] if the row width overflows.
    pub fn new(variables: &[Variable], trim_strings: bool) -> Result<Self> {
        Ok(Self {
            row_width: observation_length(variables)?,
            trim_strings,
            pending_blank_rows: 0,
            rows: 0,
        })
    }

    /// Bytes per row (sum of variable lengths).
    #[must_use]
    pub fn row_width(&self) -> usize {
        self.row_width
    }

    /// Rows emitted so far.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Append one physical record and emit every complete row now in the
    /// buffer. Returns the number of rows emitted.
    ///
    /// A row is decoded in full before any of its cells are stored, so a
    /// failure never leaves variables with unequal cell counts.
    ///
    /// # Errors
    ///
    /// [`XptError::FloatWidth`] if a numeric variable is not 8 bytes wide.
    pub fn push(
        &mut self,
        buffer: &mut RollingBuffer,
        record: &[u8],
        variables: &mut [Variable],
    ) -> Result<usize> {
        if self.row_width == 0 {
            trace!("no variables, skipping observation record");
            return Ok(0);
        }

        buffer.append(record);

        let mut emitted = 0usize;
        while let Some(bytes) = buffer.pop(self.row_width) {
            if bytes.iter().all(|&b| b == b' ') {
                self.pending_blank_rows += 1;
                continue;
            }
            let cells = decode_row(bytes, variables, self.trim_strings)?;
            emitted += self.flush_blank_rows(variables)?;
            store_row(variables, cells);
            self.rows += 1;
            emitted += 1;
        }
        Ok(emitted)
    }

    /// Close out the section.
    ///
    /// Padding only fills the tail of the final 80-byte physical record, so
    /// held-back blank rows are dropped only as far as they fit in that tail
    /// together with the residue. Any blank rows beyond that are real rows
    /// and are emitted.
    ///
    /// # Errors
    ///
    /// In strict mode, [`XptError::TrailingBytes`] if the bytes left over
    /// after the last complete row are not all blanks.
    pub fn finish(
        &mut self,
        buffer: &RollingBuffer,
        variables: &mut [Variable],
        strict: bool,
    ) -> Result<()> {
        let residue = buffer.remainder();

        if self.pending_blank_rows > 0 {
            let padding = padding_rows(self.row_width, residue.len()).min(self.pending_blank_rows);
            let real = self.pending_blank_rows - padding;
            if real > 0 {
                debug!(rows = real, "emitting trailing blank rows");
                self.emit_blank_rows(real, variables)?;
            }
            if padding > 0 {
                debug!(rows = padding, "dropping trailing blank rows as padding");
            }
            self.pending_blank_rows = 0;
        }

        if residue.iter().any(|&b| b != b' ') {
            if strict {
                return Err(XptError::TrailingBytes { len: residue.len() });
            }
            warn!(
                bytes = residue.len(),
                "ignoring non-blank bytes after the last complete row"
            );
        }
        Ok(())
    }

    fn flush_blank_rows(&mut self, variables: &mut [Variable]) -> Result<usize> {
        let pending = std::mem::take(&mut self.pending_blank_rows);
        self.emit_blank_rows(pending, variables)?;
        Ok(pending)
    }

    fn emit_blank_rows(&mut self, count: usize, variables: &mut [Variable]) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        let blank = vec![b' '; self.row_width];
        let cells = decode_row(&blank, variables, self.trim_strings)?;
        for _ in 0..count {
            store_row(variables, cells.clone());
        }
        self.rows += count;
        Ok(())
    }
}

/// How many trailing rows of `row_width` bytes fit, along with `residue`
/// bytes, in the padding of the last physical record (at most 79 bytes).
fn padding_rows(row_width: usize, residue: usize) -> usize {
    if row_width == 0 || residue >= RECORD_LEN {
        return 0;
    }
    (RECORD_LEN - 1 - residue) / row_width
}

/// Calculate observation length from variables.
fn observation_length(variables: &[Variable]) -> Result<usize> {
    let mut total = 0usize;
    for variable in variables {
        total = total
            .checked_add(variable.length)
            .ok_or(XptError::ObservationOverflow)?;
    }
    Ok(total)
}

/// Split one row into cells, walking variables in declared order.
fn decode_row(row: &[u8], variables: &[Variable], trim: bool) -> Result<Vec<DataCell>> {
    let mut cells = Vec::with_capacity(variables.len());
    let mut pos = 0usize;

    for variable in variables {
        let slice = &row[pos..pos + variable.length];
        let cell = match variable.kind {
            VariableType::Numeric => DataCell::Numeric(ibm_slice_to_ieee(slice)?),
            VariableType::Character => DataCell::Character(decode_char(slice, trim)),
        };
        cells.push(cell);
        pos += variable.length;
    }

    Ok(cells)
}

fn store_row(variables: &mut [Variable], cells: Vec<DataCell>) {
    for (variable, cell) in variables.iter_mut().zip(cells) {
        variable.cells.push(cell);
    }
}

/// Decode a character value.
fn decode_char(bytes: &[u8], trim: bool) -> String {
    let text = String::from_utf8_lossy(bytes);
    if trim {
        text.trim_end_matches(' ').to_string()
    } else {
        text.to_string()
    }
}
