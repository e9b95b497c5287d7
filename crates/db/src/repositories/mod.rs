//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod lead_repo;
pub mod setter_repo;
pub mod webhook_log_repo;

pub use lead_repo::LeadRepo;
pub use setter_repo::SetterRepo;
pub use webhook_log_repo::WebhookLogRepo;
