//! Route definitions for the reporting endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Reporting routes mounted at `/reports`.
///
/// ```text
/// GET /overall        -> overall
/// GET /setters        -> setters
/// GET /setters/{id}   -> setter_detail
/// GET /leads          -> leads
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/overall", get(reports::overall))
        .route("/setters", get(reports::setters))
        .route("/setters/{id}", get(reports::setter_detail))
        .route("/leads", get(reports::leads))
}
