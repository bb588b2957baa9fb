//! NAMESTR record parsing.
//!
//! The NAMESTR record describes a single variable in an XPT dataset.
//! Each NAMESTR is 140 bytes (or 136 bytes for VAX/VMS). Field offsets are
//! the same in both layouts; the VAX variant only has a shorter reserved tail.
//!
//! # NAMESTR Structure (140 bytes)
//!
//! | Offset | Field   | Type     | Description                    |
//! |--------|---------|----------|--------------------------------|
//! | 0-1    | ntype   | short    | 1=NUMERIC, 2=CHAR              |
//! | 2-3    | nhfun   | short    | Hash (always 0)                |
//! | 4-5    | nlng    | short    | Variable length in observation |
//! | 6-7    | nvar0   | short    | Variable number                |
//! | 8-15   | nname   | char[8]  | Variable name                  |
//! | 16-55  | nlabel  | char[40] | Variable label                 |
//! | 56-63  | nform   | char[8]  | Format name                    |
//! | 64-65  | nfl     | short    | Format field length            |
//! | 66-67  | nfd     | short    | Format decimals                |
//! | 68-69  | nfj     | short    | Justification (0=left, 1=right)|
//! | 70-71  | nfill   | char[2]  | Padding                        |
//! | 72-79  | niform  | char[8]  | Informat name                  |
//! | 80-81  | nifl    | short    | Informat length                |
//! | 82-83  | nifd    | short    | Informat decimals              |
//! | 84-87  | npos    | long     | Position in observation        |
//! | 88-139 | rest    | char[52] | Reserved                       |

use serde::Serialize;

use super::read_string;
use crate::error::{Result, XptError};

/// Size of one NAMESTR logical record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DescriptorSize {
    /// 140 bytes.
    #[default]
    Standard,
    /// 136 bytes (VAX/VMS).
    Vax,
}

impl DescriptorSize {
    /// Length in bytes.
    #[must_use]
    pub const fn byte_len(self) -> usize {
        match self {
            Self::Standard => 140,
            Self::Vax => 136,
        }
    }
}

/// Offset of the reserved tail; everything before it is common to both sizes.
const FIXED_FIELDS_LEN: usize = 88;

/// One decoded NAMESTR record.
///
/// Format, informat and justification are carried through as read; nothing
/// in the decoder interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Namestr {
    pub type_code: u16,
    pub hash: u16,
    pub length: u16,
    pub number: u16,
    pub name: String,
    pub label: String,
    pub format: String,
    pub format_length: u16,
    pub format_decimals: u16,
    pub justification: u16,
    pub fill: [u8; 2],
    pub informat: String,
    pub informat_length: u16,
    pub informat_decimals: u16,
    pub position: u32,
    pub reserved: Vec<u8>,
}

/// Parse a single NAMESTR record.
///
/// # Arguments
/// * `data` - Exactly one descriptor's worth of bytes (136 or 140)
/// * `index` - Descriptor index (for error messages)
///
/// # Errors
///
/// [`XptError::InvalidNamestr`] if the record is shorter than the fixed
/// fields. A zero variable length is accepted; such a variable takes no
/// bytes in an observation row.
pub fn parse_namestr(data: &[u8], index: usize) -> Result<Namestr> {
    if data.len() < FIXED_FIELDS_LEN {
        return Err(XptError::invalid_namestr(
            index,
            format!("data too short: {} bytes", data.len()),
        ));
    }

    Ok(Namestr {
        type_code: read_u16(data, 0),
        hash: read_u16(data, 2),
        length: read_u16(data, 4),
        number: read_u16(data, 6),
        name: read_string(data, 8, 8),
        label: read_string(data, 16, 40),
        format: read_string(data, 56, 8),
        format_length: read_u16(data, 64),
        format_decimals: read_u16(data, 66),
        justification: read_u16(data, 68),
        fill: [data[70], data[71]],
        informat: read_string(data, 72, 8),
        informat_length: read_u16(data, 80),
        informat_decimals: read_u16(data, 82),
        position: u32::from_be_bytes([data[84], data[85], data[86], data[87]]),
        reserved: data[FIXED_FIELDS_LEN..].to_vec(),
    })
}

/// Read a big-endian u16 from data.
fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([data[offset], data[offset + 1]])
}
