//! Data models
//!
//! Wire types exchanged with the REST backend. Field names are camelCase on
//! the wire, enum values snake_case. All record ids are `i64`.

pub mod document;
pub mod employee;

// Re-exports
pub use document::*;
pub use employee::*;

use crate::types::RecordId;

/// A record stored by the backend under a server-assigned id.
pub trait Record {
    fn record_id(&self) -> RecordId;
}
