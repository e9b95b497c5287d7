//! Field extraction from inbound CRM webhook payloads.
//!
//! The CRM's payload shape has drifted across versions, so each field is
//! resolved by trying a list of locations in order. Extraction never
//! fails: a missing or malformed field is simply `None`.

use serde_json::Value;

/// Resolved setter reference from a lead-created payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetterRef {
    pub email: String,
    /// Falls back to the email when the payload carries no display name.
    pub name: String,
}

/// External lead identifier: `lead.id`, then `leadId`, then `id`.
pub fn lead_id(payload: &Value) -> Option<String> {
    first_string(payload, &[&["lead", "id"], &["leadId"], &["id"]])
}

/// Creation timestamp string: `lead.createdAt`, then `createdAt`, then
/// `timestamp`.
pub fn created_at(payload: &Value) -> Option<String> {
    first_string(
        payload,
        &[&["lead", "createdAt"], &["createdAt"], &["timestamp"]],
    )
}

/// Contact timestamp string: `lead.contactedAt`, then `contactedAt`,
/// then `timestamp`.
pub fn contacted_at(payload: &Value) -> Option<String> {
    first_string(
        payload,
        &[&["lead", "contactedAt"], &["contactedAt"], &["timestamp"]],
    )
}

/// Setter reference: `appointmentSetter.*`, then `setter.*`, then bare
/// `email`/`name`.
///
/// A payload with no email yields `None` and the lead is ingested as
/// unassigned.
pub fn setter(payload: &Value) -> Option<SetterRef> {
    let email = first_string(
        payload,
        &[&["appointmentSetter", "email"], &["setter", "email"], &["email"]],
    )?;
    let name = first_string(
        payload,
        &[&["appointmentSetter", "name"], &["setter", "name"], &["name"]],
    )
    .unwrap_or_else(|| email.clone());
    Some(SetterRef { email, name })
}

/// Walk `path` into `payload` and render the leaf as a non-empty string.
/// Numbers are accepted (some CRM exports emit numeric ids).
fn string_at(payload: &Value, path: &[&str]) -> Option<String> {
    let mut current = payload;
    for key in path {
        current = current.get(key)?;
    }
    match current {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn first_string(payload: &Value, paths: &[&[&str]]) -> Option<String> {
    paths.iter().find_map(|path| string_at(payload, path))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
