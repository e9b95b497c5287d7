//! Webhook audit log entity model.

use leadspeed_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An audit row from the `webhook_logs` table. Written before an event
/// is processed, then patched with the outcome.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WebhookLog {
    pub id: DbId,
    pub endpoint: String,
    pub payload: serde_json::Value,
    pub processed: bool,
    pub error: Option<String>,
    pub created_at: Timestamp,
}
