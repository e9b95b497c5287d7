//! Handlers for the speed-to-lead statistics endpoints.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use leadspeed_core::stats::{format_time_of_day, round_mean, Percentiles, TrendPeriod};
use leadspeed_core::types::DbId;
use leadspeed_db::models::lead::TrendRow;
use leadspeed_db::repositories::LeadRepo;

use crate::error::AppResult;
use crate::handlers::reports::StatsBlock;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Average
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct AverageStats {
    pub average_speed_minutes: Option<i64>,
    pub min_speed_minutes: Option<i64>,
    pub max_speed_minutes: Option<i64>,
    pub total_contacted: i64,
}

/// GET /api/v1/stats/average
///
/// Mean/min/max speed over contacted leads.
pub async fn average(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let row = LeadRepo::stats_overall(&state.pool).await?;

    Ok(Json(DataResponse {
        data: AverageStats {
            average_speed_minutes: round_mean(row.avg_speed_minutes),
            min_speed_minutes: row.min_speed_minutes,
            max_speed_minutes: row.max_speed_minutes,
            total_contacted: row.contacted_leads,
        },
    }))
}

// ---------------------------------------------------------------------------
// Percentiles
// ---------------------------------------------------------------------------

/// GET /api/v1/stats/percentiles
///
/// p50/p75/p90/p95 over all recorded speeds. All null when no lead has
/// been contacted yet.
pub async fn percentiles(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let values = LeadRepo::speed_values(&state.pool).await?;

    Ok(Json(DataResponse {
        data: Percentiles::compute(values),
    }))
}

// ---------------------------------------------------------------------------
// Trends
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TrendParams {
    /// Bucket size; rejected at deserialization when not one of
    /// `day`/`week`/`month`.
    #[serde(default)]
    pub period: TrendPeriod,
}

#[derive(Debug, Serialize)]
pub struct TrendReport {
    pub period: TrendPeriod,
    pub trends: Vec<TrendRow>,
}

/// GET /api/v1/stats/trends?period=day|week|month
///
/// Calendar-bucketed rollups over the trailing 30 days. Buckets with no
/// leads are omitted.
pub async fn trends(
    State(state): State<AppState>,
    Query(params): Query<TrendParams>,
) -> AppResult<impl IntoResponse> {
    let trends = LeadRepo::trends(&state.pool, params.period.date_format()).await?;

    Ok(Json(DataResponse {
        data: TrendReport {
            period: params.period,
            trends,
        },
    }))
}

// ---------------------------------------------------------------------------
// Time of day
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct TimeOfDayReport {
    pub average_hour: Option<i64>,
    pub average_minute: Option<i64>,
    /// 24-hour `H:MM` form, null when there are no leads.
    pub average_time: Option<String>,
    /// 12-hour clock with AM/PM, or the literal `"N/A"`.
    pub formatted_time: String,
    pub total_leads: i64,
}

/// GET /api/v1/stats/time-of-day
///
/// Average creation time of day: hour and minute components averaged
/// independently, rendered on a 12-hour clock.
pub async fn time_of_day(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let row = LeadRepo::time_of_day(&state.pool).await?;

    let report = match (round_mean(row.avg_hour), round_mean(row.avg_minute)) {
        (Some(hour), Some(minute)) if row.total_leads > 0 => TimeOfDayReport {
            average_hour: Some(hour),
            average_minute: Some(minute),
            average_time: Some(format!("{hour}:{minute:02}")),
            formatted_time: format_time_of_day(hour, minute),
            total_leads: row.total_leads,
        },
        _ => TimeOfDayReport {
            average_hour: None,
            average_minute: None,
            average_time: None,
            formatted_time: "N/A".to_string(),
            total_leads: 0,
        },
    };

    Ok(Json(DataResponse { data: report }))
}

// ---------------------------------------------------------------------------
// Per-setter ranking
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SetterRanking {
    pub setter_id: DbId,
    pub setter_name: String,
    pub setter_email: String,
    pub stats: StatsBlock,
}

#[derive(Debug, Serialize)]
pub struct SetterRankingReport {
    pub stats_by_setter: Vec<SetterRanking>,
    pub count: usize,
}

/// GET /api/v1/stats/by-setter
///
/// Stats for every known setter, ranked fastest-first by mean speed.
/// Setters with no contacted leads (null mean) sort last.
pub async fn by_setter(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = LeadRepo::stats_per_setter(&state.pool).await?;

    let mut stats_by_setter: Vec<SetterRanking> = rows
        .iter()
        .map(|row| SetterRanking {
            setter_id: row.setter_id,
            setter_name: row.setter_name.clone(),
            setter_email: row.setter_email.clone(),
            stats: StatsBlock::from(row),
        })
        .collect();

    stats_by_setter.sort_by_key(|s| s.stats.avg_speed_minutes.unwrap_or(i64::MAX));
    let count = stats_by_setter.len();

    Ok(Json(DataResponse {
        data: SetterRankingReport {
            stats_by_setter,
            count,
        },
    }))
}
