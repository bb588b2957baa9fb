//! SAS header datetimes.
//!
//! Library and member records stamp creation and modification times as
//! `ddMMMyy:hh:mm:ss`, e.g. `15MAR24:14:30:45`.

use chrono::NaiveDateTime;

const XPT_DATETIME_FORMAT: &str = "%d%b%y:%H:%M:%S";

/// Parse an XPT header datetime. Returns `None` for blank or malformed text.
#[must_use]
pub fn parse_xpt_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(text, XPT_DATETIME_FORMAT).ok()
}
