//! Lead entity model and associated DTOs.

use leadspeed_core::lead_status::LeadStatus;
use leadspeed_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `leads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lead {
    pub id: DbId,
    /// Opaque identifier assigned by the external CRM. Unique.
    pub crm_lead_id: String,
    pub appointment_setter_id: Option<DbId>,
    pub status: String,
    /// Reconciled event timestamp, not the insert time.
    pub created_at: Timestamp,
    /// Immutable once set.
    pub first_contacted_at: Option<Timestamp>,
    pub speed_to_lead_minutes: Option<i64>,
    /// Original webhook payload plus server receipt annotations.
    pub metadata: Option<serde_json::Value>,
    pub received_at: Timestamp,
}

/// Insert payload for a new lead row.
#[derive(Debug, Clone)]
pub struct CreateLead {
    pub crm_lead_id: String,
    pub appointment_setter_id: Option<DbId>,
    pub status: LeadStatus,
    pub created_at: Timestamp,
    pub metadata: Option<serde_json::Value>,
}

/// A lead row joined with its setter's display fields, for list views.
/// Setter fields are null for unassigned leads.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeadWithSetter {
    pub id: DbId,
    pub crm_lead_id: String,
    pub appointment_setter_id: Option<DbId>,
    pub status: String,
    pub created_at: Timestamp,
    pub first_contacted_at: Option<Timestamp>,
    pub speed_to_lead_minutes: Option<i64>,
    pub metadata: Option<serde_json::Value>,
    pub received_at: Timestamp,
    pub setter_name: Option<String>,
    pub setter_email: Option<String>,
}

/// Filters for lead listing. Absent fields are not applied; present
/// fields are combined with AND.
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    pub appointment_setter_id: Option<DbId>,
    pub status: Option<LeadStatus>,
    pub created_from: Option<Timestamp>,
    pub created_to: Option<Timestamp>,
}

/// Aggregate row shared by the overall and per-setter stats queries.
/// Mean/min/max run over non-null speeds only; counts cover all rows in
/// the group.
#[derive(Debug, Clone, FromRow)]
pub struct LeadStatsRow {
    pub total_leads: i64,
    pub contacted_leads: i64,
    pub avg_speed_minutes: Option<f64>,
    pub min_speed_minutes: Option<i64>,
    pub max_speed_minutes: Option<i64>,
}

/// Per-setter aggregate row from the grouped stats query. Setters with
/// no leads appear with zero counts and null speed aggregates.
#[derive(Debug, Clone, FromRow)]
pub struct SetterStatsRow {
    pub setter_id: DbId,
    pub setter_email: String,
    pub setter_name: String,
    pub setter_created_at: Timestamp,
    pub setter_updated_at: Timestamp,
    pub total_leads: i64,
    pub contacted_leads: i64,
    pub avg_speed_minutes: Option<f64>,
    pub min_speed_minutes: Option<i64>,
    pub max_speed_minutes: Option<i64>,
}

/// One calendar bucket of the trend rollup.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrendRow {
    /// Period key, e.g. `2024-01-15`, `2024-03` (ISO week), `2024-01`.
    pub period: String,
    pub total_leads: i64,
    pub contacted_leads: i64,
    /// Unrounded; the presentation layer rounds.
    pub avg_speed_minutes: Option<f64>,
}

/// Raw averages for the time-of-day report.
#[derive(Debug, Clone, FromRow)]
pub struct TimeOfDayRow {
    pub avg_hour: Option<f64>,
    pub avg_minute: Option<f64>,
    pub total_leads: i64,
}
