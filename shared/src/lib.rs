//! Shared types for the staffdoc workspace
//!
//! Wire models, record identifiers, pagination, list filters and the form
//! rule sets used by the client crate and by form front ends.

pub mod models;
pub mod query;
pub mod rules;
pub mod types;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{Document, DocumentType, Employee, Gender, InvoiceType, NewDocument, NewEmployee, Record};
pub use query::{DocumentFilterPatch, DocumentFilters, ListFilter, ListQuery, NoFilter};
pub use rules::{FieldErrors, RuleContext};
pub use types::{IntoRecordId, InvalidRecordId, Pagination, RecordId};
