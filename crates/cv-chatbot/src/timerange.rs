//! Time-range normalization for event queries.
//!
//! Accepts the raw start/end tokens collected by the free-text prompts and
//! turns them into an absolute `TimeWindow`:
//! - start: `-<N><h|d|w|m>` relative to now, or an ISO-8601 timestamp
//! - end: the literal `now` (case-insensitive), or an ISO-8601 timestamp
//!
//! Unknown units and malformed timestamps fail fast with `TimeParseError`.
//! `start > end` is deliberately not rejected (see DESIGN.md).

use std::sync::LazyLock;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use thiserror::Error;

use cv_protocol::TimeWindow;

static RELATIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-(\d+)([A-Za-z])$").expect("static regex"));

/// Errors from time-range normalization.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("invalid relative time '{0}': expected -<integer> followed by h, d, w or m")]
    InvalidRelative(String),

    #[error("invalid time '{0}': expected an ISO-8601 timestamp")]
    InvalidTimestamp(String),
}

/// Normalize raw start/end tokens into an absolute window.
pub fn normalize(raw_start: &str, raw_end: &str) -> Result<TimeWindow, TimeParseError> {
    let now = Utc::now();
    let start = parse_start(raw_start.trim(), now)?;
    let end = parse_end(raw_end.trim(), now)?;
    Ok(TimeWindow::new(start, end))
}

/// Start boundary: relative offset or absolute timestamp. The offset is
/// anchored to now, not to the end boundary.
fn parse_start(raw: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, TimeParseError> {
    if raw.starts_with('-') {
        return parse_relative(raw, now);
    }
    parse_absolute(raw)
}

/// End boundary: the literal "now" or an absolute timestamp.
fn parse_end(raw: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, TimeParseError> {
    if raw.eq_ignore_ascii_case("now") {
        return Ok(now);
    }
    parse_absolute(raw)
}

fn parse_relative(raw: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, TimeParseError> {
    let captures = RELATIVE
        .captures(raw)
        .ok_or_else(|| TimeParseError::InvalidRelative(raw.to_string()))?;
    let count: i64 = captures[1]
        .parse()
        .map_err(|_| TimeParseError::InvalidRelative(raw.to_string()))?;
    let offset = match &captures[2] {
        "h" => Duration::hours(count),
        "d" => Duration::days(count),
        "w" => Duration::weeks(count),
        "m" => Duration::minutes(count),
        _ => return Err(TimeParseError::InvalidRelative(raw.to_string())),
    };
    Ok(now - offset)
}

fn parse_absolute(raw: &str) -> Result<DateTime<Utc>, TimeParseError> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(TimeParseError::InvalidTimestamp(raw.to_string()))
}
