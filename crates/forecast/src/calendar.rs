//! Calendar features derived from the requested target date.

use chrono::{Datelike, NaiveDate};
use serde_json::Value as JsonValue;

use stockcast_core::{ServiceError, ServiceResult};

/// Request key carrying the date to forecast.
pub const TARGET_DATE_FIELD: &str = "Target Date";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CalendarFeatures {
    pub day: u32,
    pub month: u32,
    /// Monday = 0 .. Sunday = 6.
    pub weekday: u32,
}

impl CalendarFeatures {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            day: date.day(),
            month: date.month(),
            weekday: date.weekday().num_days_from_monday(),
        }
    }
}

/// Derive calendar features from the raw `Target Date` value.
///
/// An absent date and a malformed one are reported with different messages.
pub fn derive(target_date: Option<&JsonValue>) -> ServiceResult<CalendarFeatures> {
    let raw = target_date.ok_or_else(|| {
        ServiceError::validation(
            "Missing 'Target Date'. Please include the date you want to predict for (format: YYYY-MM-DD).",
        )
    })?;

    let date = match raw {
        JsonValue::String(s) => parse_target_date(s)?,
        _ => return Err(invalid_format()),
    };

    Ok(CalendarFeatures::from_date(date))
}

/// Strict `YYYY-MM-DD` parse.
///
/// The year must be exactly four digits; signs and whitespace are rejected
/// anywhere. Month and day may omit the leading zero (`2024-3-5`).
pub fn parse_target_date(s: &str) -> ServiceResult<NaiveDate> {
    let bytes = s.as_bytes();
    let well_formed = bytes.len() > 5
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes.iter().all(|b| b.is_ascii_digit() || *b == b'-');
    if !well_formed {
        return Err(invalid_format());
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| invalid_format())
}

fn invalid_format() -> ServiceError {
    ServiceError::validation("Invalid date format. Please use 'YYYY-MM-DD' for 'Target Date'.")
}
