//! Library header record handling.
//!
//! The library header is the first set of records in an XPT file.
//!
//! # Structure
//!
//! 1. Fixed header: `HEADER RECORD*******LIBRARY HEADER RECORD!!!!!!!...`
//! 2. Real header (80 bytes): SAS version, OS, created datetime
//! 3. Second header (80 bytes): Modified datetime

use super::read_string;
use crate::types::LibraryMetadata;

/// Library header prefix.
pub const LIBRARY_HEADER_PREFIX: &str = "HEADER RECORD*******LIBRARY HEADER RECORD!!!!!!!";

/// Parse the library real header (first 80 bytes after the fixed header).
///
/// # Structure
///
/// | Offset | Length | Field       | Description              |
/// |--------|--------|-------------|--------------------------|
/// | 0-7    | 8      | sas_symbol1 | "SAS     "               |
/// | 8-15   | 8      | sas_symbol2 | "SAS     "               |
/// | 16-23  | 8      | saslib      | "SASLIB  "               |
/// | 24-31  | 8      | sasver      | SAS version              |
/// | 32-39  | 8      | sas_os      | Operating system         |
/// | 40-63  | 24     | blanks      | Spaces                   |
/// | 64-79  | 16     | created     | Created datetime         |
#[must_use]
pub fn parse_real_header(record: &[u8]) -> LibraryMetadata {
    LibraryMetadata {
        symbol: read_string(record, 0, 8),
        library: read_string(record, 16, 8),
        sas_version: read_string(record, 24, 8),
        os_name: read_string(record, 32, 8),
        created: read_string(record, 64, 16),
        modified: String::new(),
    }
}

/// Parse the second header (modified datetime at offset 0-15).
#[must_use]
pub fn parse_second_header(record: &[u8]) -> String {
    read_string(record, 0, 16)
}
