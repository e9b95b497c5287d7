//! Pure domain logic for the speed-to-lead tracking service.
//!
//! Everything in this crate is synchronous and I/O-free so the
//! calculator and aggregation logic can be unit-tested without a
//! database or HTTP stack.

pub mod error;
pub mod lead_status;
pub mod pagination;
pub mod speed_to_lead;
pub mod stats;
pub mod timestamp;
pub mod types;
pub mod webhook;
