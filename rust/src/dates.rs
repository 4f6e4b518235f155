//! Calendar-date handling at the request boundary.
//!
//! Incoming dates may be plain `YYYY-MM-DD` values or full RFC 3339
//! timestamps. Timestamps are converted to UTC and truncated to the date;
//! the scheduler itself only ever works with `NaiveDate`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

/// Error returned when a boundary date cannot be understood.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid calendar date: {0:?}")]
pub struct DateParseError(pub String);

/// Parse a calendar date, discarding any time-of-day component.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.with_timezone(&Utc).date_naive());
    }
    // Offset-less timestamps are taken as UTC
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.date());
    }

    Err(DateParseError(input.to_string()))
}

/// Today's date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Serde adapter for `Option<NaiveDate>` fields that accept dates or timestamps.
///
/// Serializes as `YYYY-MM-DD`.
pub mod optional_calendar_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_some(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| super::parse_calendar_date(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
