//! Date and time parsing for header fields.
//!
//! Three date shapes are accepted:
//!
//! | Shape | Example | Order |
//! |-------|---------|-------|
//! | slash | `03/04/24`, `25/12/2024` | [`DateOrder`] (month-first, then day-first) |
//! | dash  | `2024-12-25` | year-month-day |
//! | dot   | `25.12.2024`, `25.12.24` | day-month-year |
//!
//! Two-digit years always get a `20` prefix. There is no century window:
//! `99` is 2099.

use chrono::{NaiveDate, NaiveTime};

use crate::config::DateOrder;
use crate::error::LineError;

const MONTH_FIRST: &str = "%m/%d/%Y";
const DAY_FIRST: &str = "%d/%m/%Y";

const TIME_24H_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];
const TIME_12H_FORMATS: &[&str] = &["%I:%M:%S %p", "%I:%M %p"];

/// Prefixes a two-digit trailing year with `20`.
///
/// `sep` is the component separator. Anything that is not three components
/// with a two-digit last component is returned unchanged.
///
/// ```
/// use chatlens::parsing::datetime::expand_two_digit_year;
///
/// assert_eq!(expand_two_digit_year("11/20/16", '/'), "11/20/2016");
/// assert_eq!(expand_two_digit_year("11/20/2016", '/'), "11/20/2016");
/// ```
pub fn expand_two_digit_year(date: &str, sep: char) -> String {
    let parts: Vec<&str> = date.split(sep).collect();
    match parts.as_slice() {
        [a, b, year] if year.len() == 2 => format!("{a}{sep}{b}{sep}20{year}"),
        _ => date.to_string(),
    }
}

/// Parses a date string in any of the accepted shapes.
pub fn parse_date(raw: &str, order: DateOrder) -> Result<NaiveDate, LineError> {
    let raw = raw.trim();

    if raw.contains('/') {
        parse_slash_date(&expand_two_digit_year(raw, '/'), order)
    } else if raw.contains('-') {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| LineError::UnparsableDate)
    } else if raw.contains('.') {
        NaiveDate::parse_from_str(&expand_two_digit_year(raw, '.'), "%d.%m.%Y")
            .map_err(|_| LineError::UnparsableDate)
    } else {
        Err(LineError::UnparsableDate)
    }
}

fn parse_slash_date(date: &str, order: DateOrder) -> Result<NaiveDate, LineError> {
    let formats: &[&str] = match order {
        DateOrder::Auto => &[MONTH_FIRST, DAY_FIRST],
        DateOrder::MonthFirst => &[MONTH_FIRST],
        DateOrder::DayFirst => &[DAY_FIRST],
    };

    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
        .ok_or(LineError::UnparsableDate)
}

/// Parses a time-of-day string.
///
/// Accepts `H:MM`, `H:MM:SS`, and either of those followed by an `AM`/`PM`
/// marker in any case, with or without whitespace before it.
///
/// ```
/// use chatlens::parsing::datetime::parse_time;
/// use chrono::Timelike;
///
/// assert_eq!(parse_time("08:15 PM").unwrap().hour(), 20);
/// assert_eq!(parse_time("12:05 am").unwrap().hour(), 0);
/// assert!(parse_time("8 o'clock").is_err());
/// ```
pub fn parse_time(raw: &str) -> Result<NaiveTime, LineError> {
    let upper = raw.trim().to_uppercase();

    let (clock, marker) = if let Some(clock) = upper.strip_suffix("AM") {
        (clock, Some("AM"))
    } else if let Some(clock) = upper.strip_suffix("PM") {
        (clock, Some("PM"))
    } else {
        (upper.as_str(), None)
    };
    let clock = clock.trim();

    match marker {
        Some(marker) => {
            let normalized = format!("{clock} {marker}");
            TIME_12H_FORMATS
                .iter()
                .find_map(|fmt| NaiveTime::parse_from_str(&normalized, fmt).ok())
        }
        None => TIME_24H_FORMATS
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(clock, fmt).ok()),
    }
    .ok_or(LineError::UnparsableTime)
}
