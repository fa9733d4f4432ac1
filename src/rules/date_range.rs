//! Date range parsing.
//!
//! Leave requests carry their dates as `DD.MM.YYYY-DD.MM.YYYY`. Dates in this
//! format never contain a hyphen, so the single hyphen separates the two tokens.

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::DateInterval;

/// Parses a `DD.MM.YYYY-DD.MM.YYYY` range into a validated [`DateInterval`].
///
/// Whitespace around each token is ignored. Fails with
/// [`EngineError::InvalidDateFormat`] if there is not exactly one hyphen,
/// either token breaks the `DD.MM.YYYY` pattern or names a day that does not
/// exist, or the end precedes the start.
///
/// # Examples
///
/// ```
/// use leave_adjudicator::rules::parse_date_range;
/// use chrono::NaiveDate;
///
/// let interval = parse_date_range("22.04.2024-24.04.2024").unwrap();
/// assert_eq!(interval.start(), NaiveDate::from_ymd_opt(2024, 4, 22).unwrap());
/// assert_eq!(interval.end(), NaiveDate::from_ymd_opt(2024, 4, 24).unwrap());
///
/// assert!(parse_date_range("2024-04-22").is_err());
/// assert!(parse_date_range("31.04.2024-02.05.2024").is_err());
/// assert!(parse_date_range("10.06.2024-01.06.2024").is_err());
/// ```
pub fn parse_date_range(text: &str) -> EngineResult<DateInterval> {
    let mut tokens = text.split('-');
    let (start_token, end_token) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(start), Some(end), None) => (start.trim(), end.trim()),
        _ => {
            return Err(invalid(
                text,
                "expected exactly one '-' between two DD.MM.YYYY dates",
            ));
        }
    };

    let start = parse_date_token(text, start_token)?;
    let end = parse_date_token(text, end_token)?;

    if end < start {
        return Err(invalid(
            text,
            format!("end date {} is before start date {}", end_token, start_token),
        ));
    }

    DateInterval::new(start, end)
}

/// Parses a single `DD.MM.YYYY` token.
fn parse_date_token(input: &str, token: &str) -> EngineResult<NaiveDate> {
    let bytes = token.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[2] == b'.'
        && bytes[5] == b'.'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());

    if !well_formed {
        return Err(invalid(
            input,
            format!("'{}' does not match DD.MM.YYYY", token),
        ));
    }

    // The pattern check guarantees ASCII digits in every numeric position.
    let day: u32 = token[0..2].parse().unwrap_or(0);
    let month: u32 = token[3..5].parse().unwrap_or(0);
    let year: i32 = token[6..10].parse().unwrap_or(0);

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| invalid(input, format!("'{}' is not a calendar date", token)))
}

fn invalid(input: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidDateFormat {
        input: input.to_string(),
        message: message.into(),
    }
}
