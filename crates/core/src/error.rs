//! Domain error type shared across crates.

/// Domain-level errors surfaced through the API layer's `AppError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist. `id` is the external or
    /// database identifier as supplied by the caller.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Input failed validation.
    #[error("{0}")]
    Validation(String),

    /// The operation conflicts with existing state.
    #[error("{0}")]
    Conflict(String),

    /// Something went wrong that the caller cannot act on.
    #[error("{0}")]
    Internal(String),
}
