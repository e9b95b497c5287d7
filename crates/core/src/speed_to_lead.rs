//! Speed-to-lead calculation: elapsed minutes between lead creation and
//! first contact, plus display formatting and performance buckets.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Minutes between creation and first contact, rounded to the nearest
/// whole minute (half rounds up).
///
/// Returns `None` when contact precedes creation: an out-of-order pair
/// is recorded as "unknown" rather than a negative duration. Pure.
pub fn elapsed_minutes(created_at: Timestamp, contacted_at: Timestamp) -> Option<i64> {
    if contacted_at < created_at {
        return None;
    }
    let diff_ms = (contacted_at - created_at).num_milliseconds();
    Some((diff_ms + 30_000) / 60_000)
}

/// Render a minute count for display: `"8m"`, `"2h"`, `"2h 5m"`.
/// An unknown value renders as `"N/A"`.
pub fn format_minutes(minutes: Option<i64>) -> String {
    let Some(minutes) = minutes else {
        return "N/A".to_string();
    };

    if minutes < 60 {
        return format!("{minutes}m");
    }

    let hours = minutes / 60;
    let remainder = minutes % 60;
    if remainder == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {remainder}m")
    }
}

/// Performance bucket for a speed-to-lead measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedCategory {
    Excellent,
    Good,
    Fair,
    Poor,
    Unknown,
}

impl SpeedCategory {
    /// Bucket an elapsed-minutes value. Thresholds are inclusive upper
    /// bounds; `None` maps to `Unknown`.
    pub fn from_minutes(minutes: Option<i64>) -> Self {
        match minutes {
            None => Self::Unknown,
            Some(m) if m <= 5 => Self::Excellent,
            Some(m) if m <= 15 => Self::Good,
            Some(m) if m <= 60 => Self::Fair,
            Some(_) => Self::Poor,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
