// Utility helpers for parsing and display formatting.
//
// This module centralizes the "dirty" CSV string handling so the rest of the
// code can assume clean, typed values. All parsers accept `Option<&str>` and
// return `None` for missing/unparsable input; the loader is responsible for
// turning a `None` on a required column into a fatal error with row context.
use chrono::{NaiveDate, NaiveTime};
use num_format::{Locale, ToFormattedString};

/// Parse a calendar date. The dataset exports dates as `MM/DD/YYYY`; cleaned
/// re-exports use ISO `YYYY-MM-DD`, so both forms are accepted.
pub fn parse_date(s: Option<&str>) -> Option<NaiveDate> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}

/// Parse a time of day, `HH:MM:SS` with an `HH:MM` fallback.
pub fn parse_time(s: Option<&str>) -> Option<NaiveTime> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

pub fn parse_u32(s: Option<&str>) -> Option<u32> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<u32>().ok()
}

pub fn parse_i32(s: Option<&str>) -> Option<i32> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<i32>().ok()
}

/// Parse a boolean flag. The dataset ships both `TRUE`/`FALSE` and
/// `true`/`false` across vintages, so the comparison is case-insensitive.
pub fn parse_bool(s: Option<&str>) -> Option<bool> {
    let s = s?.trim();
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Trim a textual field, treating whitespace-only content as missing.
pub fn non_empty(s: Option<&str>) -> Option<String> {
    let s = s?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Format a floating-point value with a fixed number of decimal places and
/// locale-aware thousands separators (e.g., `1,234,567.89`).
pub fn format_number(n: f64, decimals: usize) -> String {
    let neg = n.is_sign_negative();
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

/// Thin wrapper around `num-format` for integer-like values, used for row
/// counts in console messages (e.g., `27,312 rows loaded`).
pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_both_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2019, 8, 27).unwrap();
        assert_eq!(parse_date(Some("08/27/2019")), Some(expected));
        assert_eq!(parse_date(Some("2019-08-27")), Some(expected));
        assert_eq!(parse_date(Some("27.08.2019")), None);
        assert_eq!(parse_date(Some("   ")), None);
        assert_eq!(parse_date(None), None);
    }

    #[test]
    fn parses_flags_case_insensitively() {
        assert_eq!(parse_bool(Some("TRUE")), Some(true));
        assert_eq!(parse_bool(Some("false")), Some(false));
        assert_eq!(parse_bool(Some("yes")), None);
    }

    #[test]
    fn trims_and_rejects_blank_text() {
        assert_eq!(non_empty(Some(" BROOKLYN ")), Some("BROOKLYN".to_string()));
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some("  ")), None);
    }

    #[test]
    fn formats_numbers_with_separators() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-42.5, 1), "-42.5");
        assert_eq!(format_number(66.666666, 2), "66.67");
        assert_eq!(format_int(27312i64), "27,312");
    }
}
