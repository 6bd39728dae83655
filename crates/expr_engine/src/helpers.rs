//! Formatting helpers callable from template expressions
//!
//! Each helper parses an ISO-8601 input and re-emits a fixed,
//! locale-independent pattern. Timestamps keep the wall-clock time of their
//! own offset; nothing is converted to the machine's local zone.

use crate::{ExprError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_PATTERN: &str = "%d/%m/%Y";
const DATE_TIME_PATTERN: &str = "%d/%m/%Y %H:%M";
const TIME_PATTERN: &str = "%H:%M";

/// The fixed set of helpers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Helper {
    /// `formatDate(x)` -> `DD/MM/YYYY`
    FormatDate,
    /// `formatDateTime(x)` -> `DD/MM/YYYY HH:MM`
    FormatDateTime,
    /// `formatTime(x)` -> `HH:MM`
    FormatTime,
}

impl Helper {
    pub fn from_name(name: &str) -> Option<Helper> {
        match name {
            "formatDate" => Some(Helper::FormatDate),
            "formatDateTime" => Some(Helper::FormatDateTime),
            "formatTime" => Some(Helper::FormatTime),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Helper::FormatDate => "formatDate",
            Helper::FormatDateTime => "formatDateTime",
            Helper::FormatTime => "formatTime",
        }
    }

    pub fn apply(&self, input: &str) -> Result<String> {
        let timestamp = parse_timestamp(input)?;
        let pattern = match self {
            Helper::FormatDate => DATE_PATTERN,
            Helper::FormatDateTime => DATE_TIME_PATTERN,
            Helper::FormatTime => TIME_PATTERN,
        };
        Ok(timestamp.format(pattern).to_string())
    }
}

/// Parse an ISO-8601 date or date-time into its wall-clock value.
///
/// Accepts RFC 3339 (`2024-03-05T10:30:00Z`, `...+02:00`), offset-less
/// date-times with or without seconds, and bare dates (midnight).
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ExprError::InvalidTimestamp(String::new()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(dt.naive_local());
    }

    for pattern in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, pattern) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ExprError::InvalidTimestamp(input.to_string()))
}
