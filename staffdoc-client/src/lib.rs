//! Staffdoc Client - REST client and stores for employees and documents
//!
//! Provides the HTTP transport to the backend and the in-memory stores that
//! keep the loaded pages, the current record and the request status.

pub mod client;
pub mod config;
pub mod error;
pub mod store;

pub use client::{HttpClient, ListPage, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, ClientResult};
pub use store::{
    DocumentStore, EmployeeStore, Entity, EntityStore, FetchOutcome, StoreError, StoreMessages, StoreResult,
};

// Re-export shared types for convenience
pub use shared::{
    Document, DocumentFilterPatch, DocumentFilters, DocumentType, Employee, Gender, InvoiceType, NewDocument,
    NewEmployee, Pagination, RecordId,
};
