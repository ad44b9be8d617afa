use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Error returned when a string cannot be parsed as a bill date.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid bill date '{input}': expected YYYY-MM-DD")]
pub struct ParseDateError {
    input: String,
}

/// Date-time layouts without an offset, as emitted by date pickers.
const LOCAL_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parses a bill date.
///
/// Accepts a plain `YYYY-MM-DD` date, a local date-time such as
/// `2025-06-01T10:20:00` or `2025-06-01T10:20`, or an RFC 3339 date-time
/// such as `2025-06-01T10:20:00+05:30`. For date-times the calendar date as
/// written is kept and any offset ignored.
pub fn parse_bill_date(s: &str) -> Result<NaiveDate, ParseDateError> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            LOCAL_DATE_TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .ok_or_else(|| {
            tracing::warn!(input = %s, "invalid bill date");
            ParseDateError {
                input: s.to_string(),
            }
        })
}

/// Parses an optional bill date. Empty or whitespace-only input is `None`.
pub fn parse_optional_bill_date(s: &str) -> Result<Option<NaiveDate>, ParseDateError> {
    if s.trim().is_empty() {
        Ok(None)
    } else {
        parse_bill_date(s).map(Some)
    }
}

/// Formats an optional date for display, using "—" when `None`.
pub fn opt_date_display(d: &Option<NaiveDate>) -> String {
    d.as_ref()
        .map(|v| v.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "—".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bill_date_accepts_plain_date() {
        assert_eq!(
            parse_bill_date("2025-06-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }

    #[test]
    fn parse_bill_date_accepts_date_time_with_offset() {
        assert_eq!(
            parse_bill_date("2025-06-01T23:30:00+05:30").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }

    #[test]
    fn parse_bill_date_accepts_local_date_time() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        assert_eq!(parse_bill_date("2025-06-01T10:20:00").unwrap(), expected);
        assert_eq!(parse_bill_date("2025-06-01T23:59").unwrap(), expected);
    }

    #[test]
    fn parse_bill_date_accepts_utc_date_time() {
        assert_eq!(
            parse_bill_date("2025-06-01T10:20:00Z").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }

    #[test]
    fn parse_bill_date_rejects_invalid_time() {
        assert!(parse_bill_date("2025-06-01T25:00:00").is_err());
    }

    #[test]
    fn parse_bill_date_trims_whitespace() {
        assert!(parse_bill_date(" 2025-01-31 ").is_ok());
    }

    #[test]
    fn parse_bill_date_rejects_invalid_dates() {
        assert!(parse_bill_date("2025-02-30").is_err());
        assert!(parse_bill_date("01/06/2025").is_err());
        assert!(parse_bill_date("yesterday").is_err());
    }

    #[test]
    fn parse_optional_bill_date_empty_is_none() {
        assert_eq!(parse_optional_bill_date("").unwrap(), None);
        assert_eq!(parse_optional_bill_date("  ").unwrap(), None);
    }

    #[test]
    fn opt_date_display_uses_dash_for_none() {
        assert_eq!(opt_date_display(&None), "—");
        assert_eq!(
            opt_date_display(&NaiveDate::from_ymd_opt(2025, 6, 1)),
            "2025-06-01"
        );
    }
}
