//! Date handling for sheet cells and request parameters.
//!
//! Sheet cells are typed by hand, so day-first dates show up with and without
//! a time part, with two- or four-digit years, and with `/`, `-` or `.` as
//! separators. Request parameters are stricter: ISO or `dd/mm/yyyy`.

use chrono::{Days, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{FeedbackError, Result};

static DAY_FIRST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4}|\d{2})(.*)$").unwrap());

static YEAR_FIRST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})[/\-](\d{1,2})[/\-](\d{1,2})(.*)$").unwrap());

// Optional time of day, optional zone suffix. The zone is not applied.
static TIME_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[ T]+\d{1,2}:\d{2}(?::\d{2}(?:[.,]\d+)?)?)?\s*(?:Z|[+\-]\d{2}:?\d{2})?$")
        .unwrap()
});

/// Parse a sheet cell into a calendar date, or `None` when it is not one.
pub fn parse_loose_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (year, month, day, rest) = if let Some(caps) = YEAR_FIRST.captures(text) {
        (
            caps[1].parse::<i32>().ok()?,
            caps[2].parse::<u32>().ok()?,
            caps[3].parse::<u32>().ok()?,
            caps.get(4).map_or("", |m| m.as_str()),
        )
    } else if let Some(caps) = DAY_FIRST.captures(text) {
        let year_text = &caps[3];
        let mut year = year_text.parse::<i32>().ok()?;
        if year_text.len() == 2 {
            year += 2000;
        }
        (
            year,
            caps[2].parse::<u32>().ok()?,
            caps[1].parse::<u32>().ok()?,
            caps.get(4).map_or("", |m| m.as_str()),
        )
    } else {
        return None;
    };

    if !TIME_SUFFIX.is_match(rest) {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a caller-supplied report date.
///
/// Anything containing a dash must be `YYYY-MM-DD`; everything else must be
/// `DD/MM/YYYY`.
pub fn parse_request_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    let format = if text.contains('-') { "%Y-%m-%d" } else { "%d/%m/%Y" };
    NaiveDate::parse_from_str(text, format).map_err(|_| FeedbackError::InvalidDate(text.to_string()))
}

/// The date a report covers when the caller names none.
pub fn default_report_date(today: NaiveDate, lookback_days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(lookback_days)))
        .unwrap_or(today)
}

/// Render a date the way report titles show it.
pub fn format_report_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_first_formats() {
        assert_eq!(parse_loose_date("10/11/2025"), Some(ymd(2025, 11, 10)));
        assert_eq!(parse_loose_date("10/11/2025 14:00:18"), Some(ymd(2025, 11, 10)));
        assert_eq!(parse_loose_date("1-2-2025 7:05"), Some(ymd(2025, 2, 1)));
        assert_eq!(parse_loose_date("03.04.25"), Some(ymd(2025, 4, 3)));
    }

    #[test]
    fn test_year_first_formats() {
        assert_eq!(parse_loose_date("2025-11-10"), Some(ymd(2025, 11, 10)));
        assert_eq!(parse_loose_date("2025-11-10T06:30:00Z"), Some(ymd(2025, 11, 10)));
        assert_eq!(parse_loose_date("2025/11/10 06:30:00.123"), Some(ymd(2025, 11, 10)));
        assert_eq!(parse_loose_date("2025-11-10 06:30:00-03:00"), Some(ymd(2025, 11, 10)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_loose_date(""), None);
        assert_eq!(parse_loose_date("-"), None);
        assert_eq!(parse_loose_date("nan"), None);
        assert_eq!(parse_loose_date("31/02/2025"), None);
        assert_eq!(parse_loose_date("10/11/2025 depois do almoço"), None);
        assert_eq!(parse_loose_date("G3100"), None);
    }

    #[test]
    fn test_parse_request_date() {
        assert_eq!(parse_request_date("2025-11-10").unwrap(), ymd(2025, 11, 10));
        assert_eq!(parse_request_date("10/11/2025").unwrap(), ymd(2025, 11, 10));
        assert!(parse_request_date("10-11-2025").is_err());
        assert!(parse_request_date("2025/11/10").is_err());
        assert!(parse_request_date("ontem").is_err());
    }

    #[test]
    fn test_default_report_date() {
        assert_eq!(default_report_date(ymd(2025, 3, 2), 3), ymd(2025, 2, 27));
        assert_eq!(default_report_date(ymd(2025, 3, 2), 0), ymd(2025, 3, 2));
    }

    #[test]
    fn test_format_report_date() {
        assert_eq!(format_report_date(ymd(2025, 1, 5)), "05/01/2025");
    }
}
