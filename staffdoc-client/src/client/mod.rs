//! Client module - HTTP transports.
//!
//! [`HttpClient`] is the seam the stores talk to. [`NetworkHttpClient`] goes
//! over the network with reqwest; [`OneshotHttpClient`] dispatches into an
//! in-process axum `Router`.

pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

// Re-export main types
pub use http::{HttpClient, ListPage, NetworkHttpClient, TOTAL_COUNT_HEADER};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
