//! Lead lifecycle states.

use serde::{Deserialize, Serialize};

/// Status of a lead: an initial state chosen at ingestion, then a
/// terminal `contacted` state entered exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    /// Ingested with a resolved setter.
    Created,
    /// Ingested without a setter reference.
    Unassigned,
    /// First contact recorded. Terminal.
    Contacted,
}

impl LeadStatus {
    /// Initial status for a freshly ingested lead.
    pub fn initial(setter_resolved: bool) -> Self {
        if setter_resolved {
            Self::Created
        } else {
            Self::Unassigned
        }
    }

    /// Database representation (the `leads.status` TEXT column).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Unassigned => "unassigned",
            Self::Contacted => "contacted",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_with_setter_is_created() {
        assert_eq!(LeadStatus::initial(true), LeadStatus::Created);
    }

    #[test]
    fn initial_without_setter_is_unassigned() {
        assert_eq!(LeadStatus::initial(false), LeadStatus::Unassigned);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&LeadStatus::Contacted).unwrap(),
            "\"contacted\""
        );
    }
}
