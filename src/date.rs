//! Timestamp handling for XBEL date attributes.
//!
//! XBEL writers disagree on the exact ISO-8601 flavour, so parsing tries the
//! common shapes in turn. Parsed dates are stored on records as milliseconds
//! since the Unix epoch.

use crate::error::DateParseError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const COMPACT_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO-8601-like timestamp.
///
/// Accepts RFC 3339, offsets without a colon, naive date-times (read as UTC)
/// and bare dates (midnight UTC).
pub fn parse_iso8601(input: &str) -> Result<DateTime<Utc>, DateParseError> {
    let trimmed = input.trim();
    let err = || DateParseError {
        input: input.to_string(),
    };
    if trimmed.is_empty() {
        return Err(err());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(trimmed, COMPACT_OFFSET_FORMAT) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(err)
}

/// Record representation of a timestamp.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.timestamp_millis().to_string()
}

/// Parse and format in one step.
pub fn normalize(input: &str) -> Result<String, DateParseError> {
    parse_iso8601(input).map(|dt| format_timestamp(&dt))
}
