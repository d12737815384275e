//! The day format shared by every date on the wire.
//!
//! Birth dates and visit dates travel as `yyyy/MM/dd`: day granularity, no
//! time of day, no zone. Parsing is strict. The text must be exactly ten
//! characters with zero-padded month and day, and out-of-range components
//! are rejected rather than rolled over.
//!
//! Only years `0000` through `9999` fit the four-digit year, so days outside
//! that range cannot be written at all.

use chrono::{Datelike, NaiveDate};

/// `chrono` pattern for `yyyy/MM/dd`.
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Earliest year with a four-digit rendering.
pub const MIN_YEAR: i32 = 0;

/// Latest year with a four-digit rendering.
pub const MAX_YEAR: i32 = 9999;

const DATE_LEN: usize = 10;

/// True when `date` can be written as `yyyy/MM/dd`.
#[must_use]
pub fn is_wire_date(date: NaiveDate) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&date.year())
}

/// Formats a day as `yyyy/MM/dd`.
///
/// chrono renders other years with a sign (`+10000`, `-0001`), which
/// [`parse_date`] would refuse, so those are an error here.
pub fn format_date(date: NaiveDate) -> crate::Result<String> {
    if !is_wire_date(date) {
        return Err(crate::Error::DateOutOfRange { date });
    }
    Ok(date.format(DATE_FORMAT).to_string())
}

/// Parses a `yyyy/MM/dd` string.
pub fn parse_date(value: &str) -> crate::Result<NaiveDate> {
    let invalid = || crate::Error::InvalidDate {
        value: value.to_string(),
    };

    let bytes = value.as_bytes();
    if bytes.len() != DATE_LEN || bytes[4] != b'/' || bytes[7] != b'/' {
        return Err(invalid());
    }
    if !bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
    {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}
