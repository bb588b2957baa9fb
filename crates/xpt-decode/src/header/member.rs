//! Member header record handling.
//!
//! Each dataset (member) in an XPT file has its own set of header records.
//!
//! # Structure
//!
//! 1. Member header: `HEADER RECORD*******MEMBER  HEADER RECORD!!!!!!!...`
//!    (NAMESTR length at offset 75-77)
//! 2. DSCRPTR header: `HEADER RECORD*******DSCRPTR HEADER RECORD!!!!!!!...`
//! 3. Member data (80 bytes): Dataset name, version, etc.
//! 4. Member second (80 bytes): Modified datetime, label, type
//! 5. NAMESTR header: `HEADER RECORD*******NAMESTR HEADER RECORD!!!!!!!...`
//!    (variable count at offset 54-57)
//! 6. NAMESTR records: Variable definitions
//! 7. OBS header: `HEADER RECORD*******OBS     HEADER RECORD!!!!!!!...`
//! 8. Observation data

use super::namestr::DescriptorSize;
use super::{read_digits, read_string};
use crate::error::Result;
use crate::types::MemberMetadata;

/// Member header prefix.
pub const MEMBER_HEADER_PREFIX: &str = "HEADER RECORD*******MEMBER  HEADER RECORD!!!!!!!";

/// DSCRPTR header prefix.
pub const DSCRPTR_HEADER_PREFIX: &str = "HEADER RECORD*******DSCRPTR HEADER RECORD!!!!!!!";

/// NAMESTR header prefix.
pub const NAMESTR_HEADER_PREFIX: &str = "HEADER RECORD*******NAMESTR HEADER RECORD!!!!!!!";

/// OBS header prefix.
pub const OBS_HEADER_PREFIX: &str = "HEADER RECORD*******OBS     HEADER RECORD!!!!!!!";

/// Parse the NAMESTR length from the member header record.
///
/// Three ASCII digits at offset 75-77. `"140"` selects the standard layout;
/// any other number selects the 136-byte VAX/VMS layout.
///
/// # Errors
///
/// [`crate::XptError::NumericParse`] if the field is not all digits.
pub fn parse_descriptor_size(record: &[u8]) -> Result<DescriptorSize> {
    let size = read_digits(record, 75, 3, "NAMESTR length")?;
    Ok(if size == 140 {
        DescriptorSize::Standard
    } else {
        DescriptorSize::Vax
    })
}

/// Parse the variable count from the NAMESTR header record.
///
/// Four ASCII digits at offset 54-57.
///
/// # Errors
///
/// [`crate::XptError::NumericParse`] if the field is not all digits.
pub fn parse_variable_count(record: &[u8]) -> Result<usize> {
    read_digits(record, 54, 4, "variable count")
}

/// Parse the member data record (first record after the DSCRPTR header).
///
/// | Offset | Length | Field      |
/// |--------|--------|------------|
/// | 0-7    | 8      | sas_symbol |
/// | 8-15   | 8      | dsname     |
/// | 16-23  | 8      | sasdata    |
/// | 24-31  | 8      | sasver     |
/// | 32-39  | 8      | sas_os     |
/// | 64-79  | 16     | created    |
pub fn parse_member_data(record: &[u8], member: &mut MemberMetadata) {
    member.name = read_string(record, 8, 8);
    member.sas_version = read_string(record, 24, 8);
    member.os_name = read_string(record, 32, 8);
    member.created = read_string(record, 64, 16);
}

/// Parse the member second record: modified datetime (0-15), dataset label
/// (32-71) and dataset type (72-79).
pub fn parse_member_second(record: &[u8], member: &mut MemberMetadata) {
    member.modified = read_string(record, 0, 16);
    let label = read_string(record, 32, 40);
    member.label = if label.is_empty() { None } else { Some(label) };
    let dtype = read_string(record, 72, 8);
    member.dataset_type = if dtype.is_empty() { None } else { Some(dtype) };
}
