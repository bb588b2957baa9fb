//! XPT header record parsing.
//!
//! This module handles the records that carry metadata:
//! - Library records (file-level metadata)
//! - Member records (dataset-level metadata and sizing fields)
//! - NAMESTR records (variable definitions)

pub mod datetime;
pub mod library;
pub mod member;
pub mod namestr;

pub use datetime::parse_xpt_datetime;
pub use library::{LIBRARY_HEADER_PREFIX, parse_real_header, parse_second_header};
pub use member::{
    DSCRPTR_HEADER_PREFIX, MEMBER_HEADER_PREFIX, NAMESTR_HEADER_PREFIX, OBS_HEADER_PREFIX,
    parse_descriptor_size, parse_member_data, parse_member_second, parse_variable_count,
};
pub use namestr::{DescriptorSize, Namestr, parse_namestr};

/// Read a fixed-width text field, trimming trailing ASCII blanks.
pub(crate) fn read_string(data: &[u8], offset: usize, len: usize) -> String {
    data.get(offset..offset + len)
        .map(|slice| {
            String::from_utf8_lossy(slice)
                .trim_end_matches(' ')
                .to_string()
        })
        .unwrap_or_default()
}

/// Read a fixed-width field that must contain only ASCII digits.
pub(crate) fn read_digits(
    data: &[u8],
    offset: usize,
    len: usize,
    field: &'static str,
) -> crate::Result<usize> {
    let raw = data
        .get(offset..offset + len)
        .ok_or_else(|| crate::XptError::numeric_parse(field, &[]))?;
    if !raw.iter().all(u8::is_ascii_digit) {
        return Err(crate::XptError::numeric_parse(field, raw));
    }
    raw.iter()
        .try_fold(0usize, |acc, &digit| {
            acc.checked_mul(10)?.checked_add(usize::from(digit - b'0'))
        })
        .ok_or_else(|| crate::XptError::numeric_parse(field, raw))
}
