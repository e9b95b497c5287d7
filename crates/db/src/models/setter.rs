//! Appointment setter entity model.

use leadspeed_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `appointment_setters` table. Keyed by unique email;
/// created lazily on first sighting.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AppointmentSetter {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
