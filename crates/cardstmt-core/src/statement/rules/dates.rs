//! Date normalization for statement text.

use chrono::{Datelike, NaiveDate};

/// Candidate formats, tried in order; the first successful parse wins.
pub const DATE_FORMATS: &[&str] = &[
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d/%m/%y",
    "%d-%m-%y",
    "%d.%m.%y",
    "%d %b %Y",
    "%d %B %Y",
    "%d-%b-%Y",
    "%d-%B-%Y",
    "%Y-%m-%d",
];

/// Parse a raw date token with the default format list.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    parse_date_with(raw, DATE_FORMATS)
}

/// Parse a raw date token trying `formats` in order.
pub fn parse_date_with(raw: &str, formats: &[&str]) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    formats.iter().find_map(|fmt| {
        let date = NaiveDate::parse_from_str(s, fmt).ok()?;
        // chrono's %Y takes any digit count; two-digit years belong to %y
        if fmt.contains("%Y") && !(1000..=9999).contains(&date.year()) {
            return None;
        }
        Some(date)
    })
}

/// Convert a raw date token to `YYYY-MM-DD`.
///
/// Unrecognized input is returned unchanged, so a non-canonical result
/// means the token did not parse.
pub fn standardize_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_supported_formats() {
        for raw in [
            "15/03/2024",
            "15-03-2024",
            "15.03.2024",
            "15/03/24",
            "15-03-24",
            "15.03.24",
            "15 Mar 2024",
            "15 March 2024",
            "15-Mar-2024",
            "15-March-2024",
            "2024-03-15",
        ] {
            assert_eq!(standardize_date(raw), "2024-03-15", "format of {raw}");
        }
    }

    #[test]
    fn test_canonical_is_idempotent() {
        assert_eq!(standardize_date("2024-03-15"), "2024-03-15");
        assert_eq!(standardize_date(&standardize_date("15/03/2024")), "2024-03-15");
    }

    #[test]
    fn test_single_digit_day_and_padding() {
        assert_eq!(standardize_date(" 5/1/2024 "), "2024-01-05");
        assert_eq!(standardize_date("05-jan-2024"), "2024-01-05");
    }

    #[test]
    fn test_unparsed_returned_unchanged() {
        assert_eq!(standardize_date("31/02/2024"), "31/02/2024");
        assert_eq!(standardize_date(" next Tuesday "), " next Tuesday ");
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_day_first_not_month_first() {
        assert_eq!(parse_date("01/05/2024"), NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(parse_date("12/31/2024"), None);
    }

    #[test]
    fn test_custom_format_order() {
        let us_first = ["%m/%d/%Y", "%d/%m/%Y"];
        assert_eq!(
            parse_date_with("01/05/2024", &us_first),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
    }
}
