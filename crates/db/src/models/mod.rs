//! Entity models and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct
//! matching the database row, plus the insert/filter structs its
//! repository accepts.

pub mod lead;
pub mod setter;
pub mod webhook_log;
