//! Handlers for the reporting endpoints consumed by the dashboard.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use leadspeed_core::error::CoreError;
use leadspeed_core::lead_status::LeadStatus;
use leadspeed_core::pagination::{clamp_limit, clamp_offset};
use leadspeed_core::stats::{contact_rate, round_mean};
use leadspeed_core::timestamp::parse_timestamp;
use leadspeed_core::types::{DbId, Timestamp};
use leadspeed_db::models::lead::{LeadFilter, LeadStatsRow, LeadWithSetter, SetterStatsRow};
use leadspeed_db::models::setter::AppointmentSetter;
use leadspeed_db::repositories::{LeadRepo, SetterRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// API-facing aggregate block shared by the report and stats endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct StatsBlock {
    pub total_leads: i64,
    pub contacted_leads: i64,
    pub avg_speed_minutes: Option<i64>,
    pub min_speed_minutes: Option<i64>,
    pub max_speed_minutes: Option<i64>,
    /// Whole percentage in 0..=100; zero when there are no leads.
    pub contact_rate: i64,
}

impl From<&LeadStatsRow> for StatsBlock {
    fn from(row: &LeadStatsRow) -> Self {
        Self {
            total_leads: row.total_leads,
            contacted_leads: row.contacted_leads,
            avg_speed_minutes: round_mean(row.avg_speed_minutes),
            min_speed_minutes: row.min_speed_minutes,
            max_speed_minutes: row.max_speed_minutes,
            contact_rate: contact_rate(row.contacted_leads, row.total_leads),
        }
    }
}

impl From<&SetterStatsRow> for StatsBlock {
    fn from(row: &SetterStatsRow) -> Self {
        Self {
            total_leads: row.total_leads,
            contacted_leads: row.contacted_leads,
            avg_speed_minutes: round_mean(row.avg_speed_minutes),
            min_speed_minutes: row.min_speed_minutes,
            max_speed_minutes: row.max_speed_minutes,
            contact_rate: contact_rate(row.contacted_leads, row.total_leads),
        }
    }
}

// ---------------------------------------------------------------------------
// Overall report
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct OverallReport {
    pub stats: StatsBlock,
    pub total_setters: i64,
}

/// GET /api/v1/reports/overall
///
/// Overall stats block plus the number of known setters.
pub async fn overall(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let row = LeadRepo::stats_overall(&state.pool).await?;
    let total_setters = SetterRepo::count(&state.pool).await?;

    Ok(Json(DataResponse {
        data: OverallReport {
            stats: StatsBlock::from(&row),
            total_setters,
        },
    }))
}

// ---------------------------------------------------------------------------
// Setter reports
// ---------------------------------------------------------------------------

/// A setter with its embedded stats block.
#[derive(Debug, Serialize)]
pub struct SetterReport {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub stats: StatsBlock,
}

impl From<&SetterStatsRow> for SetterReport {
    fn from(row: &SetterStatsRow) -> Self {
        Self {
            id: row.setter_id,
            email: row.setter_email.clone(),
            name: row.setter_name.clone(),
            created_at: row.setter_created_at,
            updated_at: row.setter_updated_at,
            stats: StatsBlock::from(row),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SetterListReport {
    pub setters: Vec<SetterReport>,
    pub count: usize,
}

/// GET /api/v1/reports/setters
///
/// Every known setter with its stats block. Setters without leads get
/// an all-zero/null block rather than being omitted.
pub async fn setters(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = LeadRepo::stats_per_setter(&state.pool).await?;
    let setters: Vec<SetterReport> = rows.iter().map(SetterReport::from).collect();
    let count = setters.len();

    Ok(Json(DataResponse {
        data: SetterListReport { setters, count },
    }))
}

#[derive(Debug, Serialize)]
pub struct SetterDetail {
    pub setter: AppointmentSetter,
    pub stats: StatsBlock,
    pub recent_leads: Vec<LeadWithSetter>,
}

/// GET /api/v1/reports/setters/{id}
///
/// Detailed report for one setter: stats plus their most recent leads.
pub async fn setter_detail(
    State(state): State<AppState>,
    Path(setter_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let setter = SetterRepo::find_by_id(&state.pool, setter_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "AppointmentSetter",
                id: setter_id.to_string(),
            })
        })?;

    let row = LeadRepo::stats_for_setter(&state.pool, setter_id).await?;

    let filter = LeadFilter {
        appointment_setter_id: Some(setter_id),
        ..LeadFilter::default()
    };
    let recent_leads = LeadRepo::list(&state.pool, &filter, 100, 0).await?;

    Ok(Json(DataResponse {
        data: SetterDetail {
            setter,
            stats: StatsBlock::from(&row),
            recent_leads,
        },
    }))
}

// ---------------------------------------------------------------------------
// Lead listing
// ---------------------------------------------------------------------------

/// Query parameters for the lead list endpoint. Date bounds accept any
/// form `parse_timestamp` understands (RFC 3339 or a bare date).
#[derive(Debug, Deserialize)]
pub struct LeadListParams {
    pub setter_id: Option<DbId>,
    pub status: Option<LeadStatus>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct LeadListPage {
    pub leads: Vec<LeadWithSetter>,
    pub count: usize,
    pub limit: i64,
    pub offset: i64,
}

/// GET /api/v1/reports/leads
///
/// Paginated lead list with setter/status/date-range filters.
pub async fn leads(
    State(state): State<AppState>,
    Query(params): Query<LeadListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = LeadFilter {
        appointment_setter_id: params.setter_id,
        status: params.status,
        created_from: parse_date_bound(params.start_date.as_deref(), "start_date")?,
        created_to: parse_date_bound(params.end_date.as_deref(), "end_date")?,
    };

    let limit = clamp_limit(params.limit, 100, 500);
    let offset = clamp_offset(params.offset);

    let leads = LeadRepo::list(&state.pool, &filter, limit, offset).await?;
    let count = leads.len();

    Ok(Json(DataResponse {
        data: LeadListPage {
            leads,
            count,
            limit,
            offset,
        },
    }))
}

/// Parse an optional date-bound query parameter, rejecting values that
/// do not parse (unlike webhook timestamps, a bad filter is a caller
/// mistake).
fn parse_date_bound(raw: Option<&str>, field: &str) -> Result<Option<Timestamp>, AppError> {
    match raw {
        None => Ok(None),
        Some(raw) => parse_timestamp(raw)
            .map(Some)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid {field}: {raw}"))),
    }
}
