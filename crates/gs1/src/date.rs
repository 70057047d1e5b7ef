//! Compact GS1 dates (`YYMMDD`).

use chrono::NaiveDate;

/// Parse a six-digit `YYMMDD` date.
///
/// Two-digit years 00-68 map to 2000-2068 and 69-99 to 1969-1999. Anything
/// that is not exactly six ASCII digits forming a real calendar date yields
/// `None`; a zero day is not treated as end-of-month.
pub fn parse_yymmdd(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let yy: i32 = raw[0..2].parse().ok()?;
    let month: u32 = raw[2..4].parse().ok()?;
    let day: u32 = raw[4..6].parse().ok()?;

    let year = if yy < 69 { 2000 + yy } else { 1900 + yy };
    NaiveDate::from_ymd_opt(year, month, day)
}
