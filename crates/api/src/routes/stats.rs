//! Route definitions for the statistics endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::stats;
use crate::state::AppState;

/// Statistics routes mounted at `/stats`.
///
/// ```text
/// GET /average       -> average
/// GET /percentiles   -> percentiles
/// GET /trends        -> trends (?period=day|week|month)
/// GET /time-of-day   -> time_of_day
/// GET /by-setter     -> by_setter
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/average", get(stats::average))
        .route("/percentiles", get(stats::percentiles))
        .route("/trends", get(stats::trends))
        .route("/time-of-day", get(stats::time_of_day))
        .route("/by-setter", get(stats::by_setter))
}
