//! XPT decode pass.
//!
//! [`XptDecoder`] owns all state of one pass over a file: the current
//! section, the rolling buffer and the dataset being built. [`XptReader`]
//! drives it from a byte source.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, info, info_span, trace, warn};

use crate::assembler::{NamestrAssembler, RollingBuffer, RowAssembler};
use crate::error::{PartialDecode, Result, XptError};
use crate::header::{
    parse_descriptor_size, parse_member_data, parse_member_second, parse_real_header,
    parse_second_header, parse_variable_count,
};
use crate::record::RecordSource;
use crate::section::{RecordKind, Section, Transition};
use crate::types::{Dataset, DecodeOptions};

/// Whether the decoder wants more records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The first member is complete; further records are not needed.
    Done,
}

/// State of a single decode pass.
#[derive(Debug)]
pub struct XptDecoder {
    options: DecodeOptions,
    section: Section,
    /// Data records seen since the last header.
    section_records: usize,
    buffer: RollingBuffer,
    namestrs: Option<NamestrAssembler>,
    rows: Option<RowAssembler>,
    dataset: Dataset,
    done: bool,
}

impl XptDecoder {
    #[must_use]
    pub fn new(options: DecodeOptions) -> Self {
        Self {
            options,
            section: Section::None,
            section_records: 0,
            buffer: RollingBuffer::new(),
            namestrs: None,
            rows: None,
            dataset: Dataset::default(),
            done: false,
        }
    }

    /// Section the decoder is currently in.
    #[must_use]
    pub fn section(&self) -> Section {
        self.section
    }

    /// The dataset as built so far.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }

    /// Feed one 80-byte physical record.
    ///
    /// # Errors
    ///
    /// Any malformed header field, out-of-order header or undecodable
    /// logical record stops the pass.
    pub fn feed(&mut self, record: &[u8]) -> Result<Flow> {
        if self.done {
            return Ok(Flow::Done);
        }

        let kind = RecordKind::classify(record);
        match self.section.transition(kind)? {
            Transition::Enter(next) => self.enter(next, record)?,
            Transition::Route(section) => self.route(section, record)?,
            Transition::EndOfMember => {
                info!("member header after observations, stopping after the first member");
                self.close_observations()?;
                self.done = true;
                return Ok(Flow::Done);
            }
        }
        Ok(Flow::Continue)
    }

    /// Signal a clean end of stream.
    ///
    /// # Errors
    ///
    /// [`XptError::MissingHeader`] if no header was ever seen, or
    /// [`XptError::TrailingBytes`] in strict mode.
    pub fn finish(&mut self) -> Result<()> {
        if !self.done {
            match self.section {
                Section::None => return Err(XptError::missing_header("LIBRARY HEADER")),
                Section::Observation => self.close_observations()?,
                section => warn!(%section, "stream ended before any observations"),
            }
            self.done = true;
        }

        info!(
            dataset = %self.dataset.member.name,
            variables = self.dataset.num_variables(),
            rows = self.dataset.num_rows(),
            "decoded XPT member"
        );
        Ok(())
    }

    fn enter(&mut self, next: Section, record: &[u8]) -> Result<()> {
        match next {
            Section::None | Section::Library | Section::Descriptor => {}
            Section::Member => {
                let size = parse_descriptor_size(record)?;
                debug!(descriptor_size = size.byte_len(), "NAMESTR record size");
                self.dataset.descriptor_size = Some(size);
                self.namestrs = Some(NamestrAssembler::new(size));
            }
            Section::NameHeader => {
                let count = parse_variable_count(record)?;
                debug!(count, "declared variable count");
                self.dataset.declared_variable_count = Some(count);
            }
            Section::Observation => self.open_observations()?,
        }

        debug!(from = %self.section, to = %next, "entered section");
        self.section = next;
        self.section_records = 0;
        Ok(())
    }

    fn route(&mut self, section: Section, record: &[u8]) -> Result<()> {
        let index = self.section_records;
        self.section_records += 1;

        match (section, index) {
            (Section::Library, 0) => self.dataset.library = parse_real_header(record),
            (Section::Library, 1) => self.dataset.library.modified = parse_second_header(record),
            (Section::Descriptor, 0) => parse_member_data(record, &mut self.dataset.member),
            (Section::Descriptor, 1) => parse_member_second(record, &mut self.dataset.member),
            (Section::NameHeader, _) => {
                let Some(assembler) = self.namestrs else {
                    return Err(XptError::missing_header("MEMBER HEADER"));
                };
                assembler.push(&mut self.buffer, record, &mut self.dataset.variables)?;
            }
            (Section::Observation, _) => {
                let Some(rows) = self.rows.as_mut() else {
                    return Err(XptError::missing_header("OBS HEADER"));
                };
                let emitted = rows.push(&mut self.buffer, record, &mut self.dataset.variables)?;
                trace!(index, emitted, "observation record");
            }
            (Section::None, _) => return Err(XptError::missing_header("LIBRARY HEADER")),
            (section, index) => trace!(%section, index, "ignoring record"),
        }
        Ok(())
    }

    /// Size rows from the completed variable list and drop NAMESTR padding.
    fn open_observations(&mut self) -> Result<()> {
        let parsed = self.dataset.variables.len();
        if let Some(declared) = self.dataset.declared_variable_count
            && declared != parsed
        {
            return Err(XptError::VariableCountMismatch { declared, parsed });
        }

        let rows = RowAssembler::new(&self.dataset.variables, self.options.trim_strings)?;
        debug!(row_width = rows.row_width(), "observation row width");
        self.dataset.row_width = Some(rows.row_width());
        self.rows = Some(rows);
        self.buffer.clear();
        Ok(())
    }

    fn close_observations(&mut self) -> Result<()> {
        if let Some(rows) = self.rows.as_mut() {
            rows.finish(&self.buffer, &mut self.dataset.variables, self.options.strict)?;
        }
        self.buffer.clear();
        Ok(())
    }
}

/// XPT file reader.
///
/// Reads the first member of a SAS Transport V5 file.
pub struct XptReader<R: Read> {
    source: RecordSource<BufReader<R>>,
    options: DecodeOptions,
}

impl<R: Read> XptReader<R> {
    /// Create a new XPT reader.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, DecodeOptions::default())
    }

    /// Create a new XPT reader with options.
    pub fn with_options(reader: R, options: DecodeOptions) -> Self {
        Self {
            source: RecordSource::new(BufReader::new(reader)),
            options,
        }
    }

    /// Decode the stream.
    ///
    /// # Errors
    ///
    /// On failure the returned [`PartialDecode`] carries the error together
    /// with everything decoded before it.
    pub fn read_dataset(mut self) -> std::result::Result<Dataset, PartialDecode> {
        let span = info_span!("decode_xpt");
        let _guard = span.enter();

        let mut decoder = XptDecoder::new(self.options.clone());
        match self.run(&mut decoder) {
            Ok(()) => Ok(decoder.into_dataset()),
            Err(error) => {
                debug!(
                    offset = self.source.offset(),
                    section = %decoder.section(),
                    %error,
                    "decode aborted"
                );
                Err(PartialDecode {
                    error,
                    dataset: Box::new(decoder.into_dataset()),
                })
            }
        }
    }

    fn run(&mut self, decoder: &mut XptDecoder) -> Result<()> {
        while let Some(record) = self.source.next_record()? {
            trace!(offset = self.source.offset(), "physical record");
            if decoder.feed(&record)? == Flow::Done {
                break;
            }
        }
        decoder.finish()
    }
}

impl XptReader<File> {
    /// Open an XPT file for reading.
    ///
    /// # Arguments
    /// * `path` - Path to the XPT file
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_options(path, DecodeOptions::default())
    }

    /// Open an XPT file with options.
    pub fn open_with_options(path: &Path, options: DecodeOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                XptError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                XptError::Io(e)
            }
        })?;
        Ok(Self::with_options(file, options))
    }
}

/// Read an XPT file from a path.
///
/// This is a convenience function that opens and reads the file, discarding
/// any partial result on error.
pub fn read_xpt(path: &Path) -> Result<Dataset> {
    Ok(XptReader::open(path)?.read_dataset()?)
}

/// Read an XPT file with options.
pub fn read_xpt_with_options(path: &Path, options: DecodeOptions) -> Result<Dataset> {
    Ok(XptReader::open_with_options(path, options)?.read_dataset()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{
        LIBRARY_HEADER_PREFIX, MEMBER_HEADER_PREFIX, NAMESTR_HEADER_PREFIX, OBS_HEADER_PREFIX,
    };
    use crate::record::RECORD_LEN;

    fn header(prefix: &str) -> [u8; RECORD_LEN] {
        let mut record = [b' '; RECORD_LEN];
        record[..48].copy_from_slice(prefix.as_bytes());
        record[48..78].fill(b'0');
        record
    }

    #[test]
    fn test_sections_advance() {
        let mut decoder = XptDecoder::new(DecodeOptions::default());
        assert_eq!(decoder.section(), Section::None);

        decoder.feed(&header(LIBRARY_HEADER_PREFIX)).unwrap();
        assert_eq!(decoder.section(), Section::Library);

        let mut member = header(MEMBER_HEADER_PREFIX);
        member[74..78].copy_from_slice(b"0136");
        decoder.feed(&member).unwrap();
        assert_eq!(decoder.section(), Section::Member);
        assert_eq!(
            decoder
                .dataset()
                .descriptor_size
                .map(crate::header::DescriptorSize::byte_len),
            Some(136)
        );
    }

    #[test]
    fn test_out_of_order_header_is_rejected() {
        let mut decoder = XptDecoder::new(DecodeOptions::default());
        decoder.feed(&header(LIBRARY_HEADER_PREFIX)).unwrap();
        let err = decoder.feed(&header(NAMESTR_HEADER_PREFIX)).unwrap_err();
        assert!(matches!(err, XptError::UnexpectedHeader { .. }));
        assert_eq!(decoder.section(), Section::Library);
    }

    #[test]
    fn test_finish_without_header() {
        let mut decoder = XptDecoder::new(DecodeOptions::default());
        assert!(matches!(
            decoder.finish().unwrap_err(),
            XptError::MissingHeader { .. }
        ));
    }

    #[test]
    fn test_observation_header_requires_declared_count() {
        let mut decoder = XptDecoder::new(DecodeOptions::default());
        decoder.feed(&header(LIBRARY_HEADER_PREFIX)).unwrap();
        decoder.feed(&header(MEMBER_HEADER_PREFIX)).unwrap();
        decoder
            .feed(&header(crate::header::DSCRPTR_HEADER_PREFIX))
            .unwrap();

        let mut namestr = header(NAMESTR_HEADER_PREFIX);
        namestr[54..58].copy_from_slice(b"0003");
        decoder.feed(&namestr).unwrap();

        let err = decoder.feed(&header(OBS_HEADER_PREFIX)).unwrap_err();
        assert!(matches!(
            err,
            XptError::VariableCountMismatch {
                declared: 3,
                parsed: 0
            }
        ));
    }
}
