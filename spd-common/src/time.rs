//! Timestamp utilities

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Parse a space creation timestamp.
///
/// The API has shipped three spellings over its lifetime:
/// - RFC 3339 (`2025-06-01T08:00:00Z`, current schema)
/// - `YYYY-MM-DD HH:MM:SS` (old schema, implicitly UTC)
/// - bare `YYYY-MM-DD` (oldest records)
///
/// Returns `None` for anything else; callers treat that as a missing hint.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

/// ISO calendar date (`YYYY-MM-DD`) of a timestamp, in UTC
pub fn iso_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}
