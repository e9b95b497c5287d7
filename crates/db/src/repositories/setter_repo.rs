//! Repository for the `appointment_setters` table.

use sqlx::PgPool;

use leadspeed_core::types::DbId;

use crate::models::setter::AppointmentSetter;

/// Column list for `appointment_setters` queries.
const COLUMNS: &str = "id, email, name, created_at, updated_at";

/// Provides lookup and upsert operations for appointment setters.
pub struct SetterRepo;

impl SetterRepo {
    /// Find a setter by email, creating it on first sighting.
    ///
    /// The upsert also refreshes the display name, so the most recent
    /// payload wins. The unique constraint on `email` makes this atomic
    /// under concurrent events for the same setter.
    pub async fn find_or_create(
        pool: &PgPool,
        email: &str,
        name: &str,
    ) -> Result<AppointmentSetter, sqlx::Error> {
        let query = format!(
            "INSERT INTO appointment_setters (email, name) \
             VALUES ($1, $2) \
             ON CONFLICT (email) DO UPDATE \
             SET name = EXCLUDED.name, updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AppointmentSetter>(&query)
            .bind(email)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find a setter by its database id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AppointmentSetter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appointment_setters WHERE id = $1");
        sqlx::query_as::<_, AppointmentSetter>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all setters ordered by display name.
    pub async fn list(pool: &PgPool) -> Result<Vec<AppointmentSetter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appointment_setters ORDER BY name ASC");
        sqlx::query_as::<_, AppointmentSetter>(&query)
            .fetch_all(pool)
            .await
    }

    /// Total number of known setters.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM appointment_setters")
            .fetch_one(pool)
            .await
    }
}
