//! Shared fixtures: an IBM float encoder and an XPT file builder.

#![allow(dead_code)]

use tracing_subscriber::EnvFilter;

pub const RECORD_LEN: usize = 80;

pub const LIBRARY: &str = "HEADER RECORD*******LIBRARY HEADER RECORD!!!!!!!";
pub const MEMBER: &str = "HEADER RECORD*******MEMBER  HEADER RECORD!!!!!!!";
pub const DSCRPTR: &str = "HEADER RECORD*******DSCRPTR HEADER RECORD!!!!!!!";
pub const NAMESTR: &str = "HEADER RECORD*******NAMESTR HEADER RECORD!!!!!!!";
pub const OBS: &str = "HEADER RECORD*******OBS     HEADER RECORD!!!!!!!";

/// Route decoder logs to the test output. Set `RUST_LOG` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Encode a double as an 8-byte IBM long float.
///
/// Values outside the IBM exponent range are not supported.
pub fn ieee_to_ibm(value: f64) -> [u8; 8] {
    if value == 0.0 {
        return [0u8; 8];
    }

    let sign = if value < 0.0 { 0x80u8 } else { 0 };
    let magnitude = value.abs();

    // magnitude = fraction * 16^exponent, 1/16 <= fraction < 1
    let mut exponent = (magnitude.log2() / 4.0).ceil() as i32;
    let mut fraction = magnitude / 16f64.powi(exponent);
    while fraction >= 1.0 {
        fraction /= 16.0;
        exponent += 1;
    }
    while fraction < 1.0 / 16.0 {
        fraction *= 16.0;
        exponent -= 1;
    }

    let mut bits = (fraction * 2f64.powi(56)).round() as u64;
    if bits >= 1u64 << 56 {
        bits >>= 4;
        exponent += 1;
    }

    let biased = u8::try_from(exponent + 64).expect("exponent out of IBM range");
    let mut out = bits.to_be_bytes();
    out[0] = sign | biased;
    out
}

/// Blank-padded fixed header record carrying `marker`.
pub fn header_record(marker: &str) -> [u8; RECORD_LEN] {
    let mut record = [b' '; RECORD_LEN];
    record[..48].copy_from_slice(marker.as_bytes());
    record[48..78].fill(b'0');
    record
}

pub fn member_header(descriptor_size: usize) -> [u8; RECORD_LEN] {
    let mut record = header_record(MEMBER);
    record[64..68].copy_from_slice(b"0160");
    record[74..78].copy_from_slice(format!("{descriptor_size:04}").as_bytes());
    record
}

pub fn namestr_header(count: &str) -> [u8; RECORD_LEN] {
    let mut record = header_record(NAMESTR);
    record[54..58].copy_from_slice(count.as_bytes());
    record
}

fn put(record: &mut [u8], offset: usize, text: &str) {
    record[offset..offset + text.len()].copy_from_slice(text.as_bytes());
}

pub fn library_real_header() -> [u8; RECORD_LEN] {
    let mut record = [b' '; RECORD_LEN];
    put(&mut record, 0, "SAS");
    put(&mut record, 8, "SAS");
    put(&mut record, 16, "SASLIB");
    put(&mut record, 24, "9.4");
    put(&mut record, 32, "X64_7PRO");
    put(&mut record, 64, "15MAR24:14:30:45");
    record
}

pub fn library_second_header() -> [u8; RECORD_LEN] {
    let mut record = [b' '; RECORD_LEN];
    put(&mut record, 0, "16MAR24:09:00:00");
    record
}

pub fn member_data(name: &str) -> [u8; RECORD_LEN] {
    let mut record = [b' '; RECORD_LEN];
    put(&mut record, 0, "SAS");
    put(&mut record, 8, name);
    put(&mut record, 16, "SASDATA");
    put(&mut record, 24, "9.4");
    put(&mut record, 32, "X64_7PRO");
    put(&mut record, 64, "15MAR24:14:30:45");
    record
}

pub fn member_second(label: &str) -> [u8; RECORD_LEN] {
    let mut record = [b' '; RECORD_LEN];
    put(&mut record, 0, "16MAR24:09:00:00");
    put(&mut record, 32, label);
    put(&mut record, 72, "DATA");
    record
}

/// One variable definition for a fixture file.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub label: String,
    pub type_code: u16,
    pub length: u16,
}

impl Column {
    pub fn numeric(name: &str) -> Self {
        Self {
            name: name.to_string(),
            label: String::new(),
            type_code: 1,
            length: 8,
        }
    }

    pub fn character(name: &str, length: u16) -> Self {
        Self {
            name: name.to_string(),
            label: String::new(),
            type_code: 2,
            length,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn with_length(mut self, length: u16) -> Self {
        self.length = length;
        self
    }
}

/// A cell value for a fixture row.
#[derive(Debug, Clone)]
pub enum Cell {
    Num(f64),
    Text(String),
}

pub fn num(value: f64) -> Cell {
    Cell::Num(value)
}

pub fn text(value: &str) -> Cell {
    Cell::Text(value.to_string())
}

/// Build one NAMESTR record.
pub fn namestr(column: &Column, number: u16, position: u32, size: usize) -> Vec<u8> {
    let mut buf = vec![0u8; size];
    buf[0..2].copy_from_slice(&column.type_code.to_be_bytes());
    buf[4..6].copy_from_slice(&column.length.to_be_bytes());
    buf[6..8].copy_from_slice(&number.to_be_bytes());
    buf[8..16].copy_from_slice(format!("{:<8}", column.name).as_bytes());
    buf[16..56].copy_from_slice(format!("{:<40}", column.label).as_bytes());
    buf[56..64].fill(b' ');
    buf[72..80].fill(b' ');
    buf[84..88].copy_from_slice(&position.to_be_bytes());
    buf
}

/// Encode one observation row.
pub fn encode_row(columns: &[Column], row: &[Cell]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for (column, cell) in columns.iter().zip(row) {
        let width = usize::from(column.length);
        match cell {
            Cell::Num(value) => bytes.extend_from_slice(&ieee_to_ibm(*value)[..width]),
            Cell::Text(value) => {
                let mut field = value.as_bytes().to_vec();
                field.resize(width, b' ');
                bytes.extend_from_slice(&field);
            }
        }
    }
    bytes
}

/// Pad to the next 80-byte boundary with blanks.
pub fn pad_to_record(mut bytes: Vec<u8>) -> Vec<u8> {
    let rem = bytes.len() % RECORD_LEN;
    if rem != 0 {
        bytes.resize(bytes.len() + RECORD_LEN - rem, b' ');
    }
    bytes
}

/// Builder for a complete single-member XPT file.
#[derive(Debug, Clone)]
pub struct XptFixture {
    pub name: String,
    pub label: String,
    pub descriptor_size: usize,
    pub declared_count: Option<String>,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
}

impl XptFixture {
    pub fn new(name: &str, columns: Vec<Column>) -> Self {
        Self {
            name: name.to_string(),
            label: String::new(),
            descriptor_size: 140,
            declared_count: None,
            columns,
            rows: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn with_descriptor_size(mut self, size: usize) -> Self {
        self.descriptor_size = size;
        self
    }

    /// Override the NAMESTR header's variable count field verbatim.
    pub fn with_declared_count(mut self, raw: &str) -> Self {
        self.declared_count = Some(raw.to_string());
        self
    }

    pub fn row(mut self, cells: Vec<Cell>) -> Self {
        self.rows.push(cells);
        self
    }

    /// Everything up to and including the OBS header.
    pub fn build_headers(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&header_record(LIBRARY));
        out.extend_from_slice(&library_real_header());
        out.extend_from_slice(&library_second_header());
        out.extend_from_slice(&member_header(self.descriptor_size));
        out.extend_from_slice(&header_record(DSCRPTR));
        out.extend_from_slice(&member_data(&self.name));
        out.extend_from_slice(&member_second(&self.label));

        let count = self
            .declared_count
            .clone()
            .unwrap_or_else(|| format!("{:04}", self.columns.len()));
        out.extend_from_slice(&namestr_header(&count));

        let mut descriptors = Vec::new();
        let mut position = 0u32;
        for (i, column) in self.columns.iter().enumerate() {
            let number = u16::try_from(i + 1).unwrap();
            descriptors.extend(namestr(column, number, position, self.descriptor_size));
            position += u32::from(column.length);
        }
        out.extend(pad_to_record(descriptors));

        out.extend_from_slice(&header_record(OBS));
        out
    }

    /// Observation bytes, padded to a record boundary.
    pub fn build_observations(&self) -> Vec<u8> {
        let mut data = Vec::new();
        for row in &self.rows {
            data.extend(encode_row(&self.columns, row));
        }
        pad_to_record(data)
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = self.build_headers();
        out.extend(self.build_observations());
        out
    }
}
