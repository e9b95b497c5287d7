pub mod health;
pub mod reports;
pub mod stats;
pub mod webhooks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /reports/overall          overall stats + setter count
/// /reports/setters          all setters with embedded stats
/// /reports/setters/{id}     setter detail with recent leads
/// /reports/leads            filtered, paginated lead list
///
/// /stats/average            mean/min/max speed
/// /stats/percentiles        p50/p75/p90/p95 breakdown
/// /stats/trends             day/week/month rollups, 30-day window
/// /stats/time-of-day        average creation time of day
/// /stats/by-setter          ranked per-setter stats
///
/// /webhook-logs             recent webhook audit rows
/// ```
///
/// Webhook ingestion routes are mounted at the root level (see
/// [`webhooks::router`]) so the paths configured in the external CRM
/// stay stable across API versions.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/reports", reports::router())
        .nest("/stats", stats::router())
        .merge(webhooks::logs_router())
}
