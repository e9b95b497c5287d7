//! Repository for the `webhook_logs` audit table.

use sqlx::PgPool;

use leadspeed_core::types::DbId;

use crate::models::webhook_log::WebhookLog;

/// Column list for `webhook_logs` queries.
const COLUMNS: &str = "id, endpoint, payload, processed, error, created_at";

/// Provides append and outcome-patch operations for the webhook audit
/// log. Rows are never deleted by this subsystem.
pub struct WebhookLogRepo;

impl WebhookLogRepo {
    /// Append an audit row for a received payload. Called before the
    /// event is processed so the payload survives a processing failure.
    pub async fn create(
        pool: &PgPool,
        endpoint: &str,
        payload: &serde_json::Value,
    ) -> Result<WebhookLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO webhook_logs (endpoint, payload) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WebhookLog>(&query)
            .bind(endpoint)
            .bind(payload)
            .fetch_one(pool)
            .await
    }

    /// Mark an audit row as successfully processed.
    pub async fn mark_processed(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE webhook_logs SET processed = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Mark an audit row as processed with a failure reason attached.
    pub async fn mark_failed(pool: &PgPool, id: DbId, error: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE webhook_logs SET processed = TRUE, error = $2 WHERE id = $1")
            .bind(id)
            .bind(error)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// List audit rows newest-first with optional endpoint/processed
    /// filters.
    pub async fn list(
        pool: &PgPool,
        endpoint: Option<&str>,
        processed: Option<bool>,
        limit: i64,
    ) -> Result<Vec<WebhookLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM webhook_logs \
             WHERE ($1::text IS NULL OR endpoint = $1) \
               AND ($2::boolean IS NULL OR processed = $2) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $3"
        );
        sqlx::query_as::<_, WebhookLog>(&query)
            .bind(endpoint)
            .bind(processed)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
