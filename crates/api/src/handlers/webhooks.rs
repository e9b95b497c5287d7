//! Handlers for inbound CRM webhook events.
//!
//! Every event is written to `webhook_logs` before processing, and the
//! row is patched with the outcome afterward, so a failed event keeps
//! its payload and failure reason for debugging. Ingestion is
//! idempotent on the external lead id; the contact transition happens
//! exactly once per lead.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use leadspeed_core::error::CoreError;
use leadspeed_core::lead_status::LeadStatus;
use leadspeed_core::pagination::clamp_limit;
use leadspeed_core::speed_to_lead::{self, SpeedCategory};
use leadspeed_core::timestamp::{self, TimestampSource};
use leadspeed_core::types::Timestamp;
use leadspeed_core::webhook;
use leadspeed_db::models::lead::{CreateLead, Lead};
use leadspeed_db::repositories::{LeadRepo, SetterRepo, WebhookLogRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Acknowledgment returned to the CRM for a lead-created event.
#[derive(Debug, Serialize)]
pub struct CreatedAck {
    pub message: &'static str,
    pub lead: Lead,
}

/// Acknowledgment returned to the CRM for a lead-contacted event.
#[derive(Debug, Serialize)]
pub struct ContactedAck {
    pub message: &'static str,
    pub speed_to_lead_minutes: Option<i64>,
    pub category: SpeedCategory,
    pub lead: Lead,
}

// ---------------------------------------------------------------------------
// Lead created
// ---------------------------------------------------------------------------

/// POST /webhooks/lead-created
///
/// Ingest a creation event. Resolves the setter (lazily created by
/// email), reconciles the event timestamp, and stores the lead with the
/// original payload preserved in metadata. A repeated event for the
/// same external id returns the stored record unchanged.
pub async fn lead_created(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let received_at = Utc::now();
    let log = WebhookLogRepo::create(&state.pool, "/webhooks/lead-created", &payload).await?;

    let outcome = process_lead_created(&state, &payload, received_at).await;
    record_outcome(&state, log.id, outcome.as_ref().err()).await;
    outcome
}

async fn process_lead_created(
    state: &AppState,
    payload: &Value,
    received_at: Timestamp,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedAck>>)> {
    let crm_lead_id = webhook::lead_id(payload).ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Missing required field: lead ID".into(),
        ))
    })?;

    if let Some(existing) = LeadRepo::find_by_crm_id(&state.pool, &crm_lead_id).await? {
        return Ok(ack_created(StatusCode::OK, "Lead already exists", existing));
    }

    let raw_created_at = webhook::created_at(payload);
    let (created_at, source) =
        timestamp::resolve_event_timestamp(raw_created_at.as_deref(), received_at);
    if source == TimestampSource::Server {
        tracing::debug!(%crm_lead_id, "No usable timestamp in payload, using server receipt time");
    }

    let setter = match webhook::setter(payload) {
        Some(setter_ref) => {
            Some(SetterRepo::find_or_create(&state.pool, &setter_ref.email, &setter_ref.name).await?)
        }
        None => {
            tracing::debug!(%crm_lead_id, "No setter in payload, ingesting as unassigned");
            None
        }
    };

    let input = CreateLead {
        crm_lead_id: crm_lead_id.clone(),
        appointment_setter_id: setter.as_ref().map(|s| s.id),
        status: LeadStatus::initial(setter.is_some()),
        created_at,
        metadata: Some(annotate_metadata(
            payload,
            received_at,
            source,
            raw_created_at.as_deref(),
        )),
    };

    match LeadRepo::insert_if_absent(&state.pool, &input).await? {
        Some(lead) => {
            tracing::info!(%crm_lead_id, status = %lead.status, "Lead ingested");
            Ok(ack_created(
                StatusCode::CREATED,
                "Lead created successfully",
                lead,
            ))
        }
        // Lost a same-id race after the existence check; the stored row
        // wins.
        None => {
            let lead = LeadRepo::find_by_crm_id(&state.pool, &crm_lead_id)
                .await?
                .ok_or_else(|| {
                    AppError::InternalError(format!(
                        "Lead {crm_lead_id} missing after conflicting insert"
                    ))
                })?;
            Ok(ack_created(StatusCode::OK, "Lead already exists", lead))
        }
    }
}

fn ack_created(
    status: StatusCode,
    message: &'static str,
    lead: Lead,
) -> (StatusCode, Json<DataResponse<CreatedAck>>) {
    (status, Json(DataResponse { data: CreatedAck { message, lead } }))
}

// ---------------------------------------------------------------------------
// Lead contacted
// ---------------------------------------------------------------------------

/// POST /webhooks/lead-contacted
///
/// Record first contact for a lead and compute its speed-to-lead. A
/// contact event for an already-contacted lead is a no-op that returns
/// the stored record; an unknown lead id is rejected with 404.
pub async fn lead_contacted(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let received_at = Utc::now();
    let log = WebhookLogRepo::create(&state.pool, "/webhooks/lead-contacted", &payload).await?;

    let outcome = process_lead_contacted(&state, &payload, received_at).await;
    record_outcome(&state, log.id, outcome.as_ref().err()).await;
    outcome
}

async fn process_lead_contacted(
    state: &AppState,
    payload: &Value,
    received_at: Timestamp,
) -> AppResult<(StatusCode, Json<DataResponse<ContactedAck>>)> {
    let crm_lead_id = webhook::lead_id(payload).ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Missing required field: lead ID".into(),
        ))
    })?;

    let lead = LeadRepo::find_by_crm_id(&state.pool, &crm_lead_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Lead",
                id: crm_lead_id.clone(),
            })
        })?;

    if lead.first_contacted_at.is_some() {
        return Ok(ack_contacted("Lead already marked as contacted", lead));
    }

    let (contacted_at, source) = timestamp::resolve_event_timestamp(
        webhook::contacted_at(payload).as_deref(),
        received_at,
    );
    if source == TimestampSource::Server {
        tracing::debug!(%crm_lead_id, "No usable timestamp in payload, using server receipt time");
    }

    let minutes = speed_to_lead::elapsed_minutes(lead.created_at, contacted_at);
    if minutes.is_none() {
        tracing::warn!(%crm_lead_id, "Contact timestamp precedes creation, recording speed as unknown");
    }

    let updated = match LeadRepo::mark_contacted(&state.pool, &crm_lead_id, contacted_at, minutes)
        .await?
    {
        Some(lead) => {
            tracing::info!(
                %crm_lead_id,
                speed = %speed_to_lead::format_minutes(lead.speed_to_lead_minutes),
                "Lead contact recorded"
            );
            lead
        }
        // A concurrent contact event won the row-level race; report the
        // stored record unchanged.
        None => LeadRepo::find_by_crm_id(&state.pool, &crm_lead_id)
            .await?
            .ok_or_else(|| {
                AppError::InternalError(format!(
                    "Lead {crm_lead_id} missing after contact transition"
                ))
            })?,
    };

    Ok(ack_contacted("Lead contact recorded successfully", updated))
}

fn ack_contacted(
    message: &'static str,
    lead: Lead,
) -> (StatusCode, Json<DataResponse<ContactedAck>>) {
    (
        StatusCode::OK,
        Json(DataResponse {
            data: ContactedAck {
                message,
                speed_to_lead_minutes: lead.speed_to_lead_minutes,
                category: SpeedCategory::from_minutes(lead.speed_to_lead_minutes),
                lead,
            },
        }),
    )
}

// ---------------------------------------------------------------------------
// Audit log
// ---------------------------------------------------------------------------

/// Query parameters for the webhook audit log listing.
#[derive(Debug, Deserialize)]
pub struct WebhookLogParams {
    pub endpoint: Option<String>,
    pub processed: Option<bool>,
    pub limit: Option<i64>,
}

/// GET /api/v1/webhook-logs
///
/// Recent audit rows, newest first, with optional endpoint/processed
/// filters.
pub async fn list_logs(
    State(state): State<AppState>,
    Query(params): Query<WebhookLogParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, 100, 500);
    let logs = WebhookLogRepo::list(
        &state.pool,
        params.endpoint.as_deref(),
        params.processed,
        limit,
    )
    .await?;
    Ok(Json(DataResponse { data: logs }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Patch the audit row with the processing outcome. A logging failure
/// here is traced but never masks the original result.
async fn record_outcome(state: &AppState, log_id: i64, error: Option<&AppError>) {
    let result = match error {
        None => WebhookLogRepo::mark_processed(&state.pool, log_id).await,
        Some(err) => WebhookLogRepo::mark_failed(&state.pool, log_id, &err.to_string()).await,
    };
    if let Err(log_err) = result {
        tracing::error!(log_id, error = %log_err, "Failed to record webhook outcome");
    }
}

/// Original payload preserved verbatim, with server receipt details
/// attached under a `_server` key. Non-object payloads are wrapped so
/// the annotation always has somewhere to live.
fn annotate_metadata(
    payload: &Value,
    received_at: Timestamp,
    source: TimestampSource,
    payload_timestamp: Option<&str>,
) -> Value {
    let server = json!({
        "webhook_received_at": received_at,
        "timestamp_source": source,
        "payload_timestamp": payload_timestamp,
    });

    match payload {
        Value::Object(map) => {
            let mut map = map.clone();
            map.insert("_server".to_string(), server);
            Value::Object(map)
        }
        other => json!({ "payload": other, "_server": server }),
    }
}
