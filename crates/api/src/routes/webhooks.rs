//! Route definitions for CRM webhook ingestion.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

/// Ingestion routes mounted at `/webhooks` (root level, not under
/// `/api/v1` -- these paths are configured in the external CRM).
///
/// ```text
/// POST /lead-created    -> lead_created
/// POST /lead-contacted  -> lead_contacted
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lead-created", post(webhooks::lead_created))
        .route("/lead-contacted", post(webhooks::lead_contacted))
}

/// Audit log routes mounted under `/api/v1`.
///
/// ```text
/// GET /webhook-logs  -> list_logs
/// ```
pub fn logs_router() -> Router<AppState> {
    Router::new().route("/webhook-logs", get(webhooks::list_logs))
}
