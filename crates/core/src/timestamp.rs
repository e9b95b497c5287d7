//! Timestamp reconciliation for inbound webhook events.
//!
//! CRM payloads may carry their own event timestamp; when present and
//! parseable it wins, otherwise the server receipt time is used. The
//! chosen source is recorded in lead metadata for debugging only and
//! carries no behavioral consequence.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

use crate::types::Timestamp;

/// Which clock produced a recorded event timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampSource {
    Payload,
    Server,
}

/// Parse a timestamp string from a webhook payload.
///
/// Accepts RFC 3339 (`2024-01-15T10:30:00Z`, offset forms) plus the
/// offset-less variants CRMs commonly emit, which are assumed UTC.
/// Returns `None` rather than an error: an unparseable value is treated
/// as "not present" and falls back to the server clock.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    // Bare dates resolve to midnight UTC.
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }

    None
}

/// Choose the timestamp to record for an event: the payload-supplied
/// value when it parses, otherwise the server receipt time.
pub fn resolve_event_timestamp(
    raw: Option<&str>,
    received_at: Timestamp,
) -> (Timestamp, TimestampSource) {
    match raw.and_then(parse_timestamp) {
        Some(ts) => (ts, TimestampSource::Payload),
        None => (received_at, TimestampSource::Server),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
