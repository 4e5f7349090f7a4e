//! Common types for the shared crate
//!
//! Record identifiers and pagination metadata used by the models and the
//! client-side stores.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier assigned by the backend to a stored record.
///
/// Route parameters arrive as strings while records carry integers; both are
/// normalised into a `RecordId` before any lookup or request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Returned when a string id is not a plain decimal integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid record id: {0:?}")]
pub struct InvalidRecordId(pub String);

impl FromStr for RecordId {
    type Err = InvalidRecordId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(RecordId)
            .map_err(|_| InvalidRecordId(s.to_string()))
    }
}

/// Conversion accepted by every store operation that takes an id.
pub trait IntoRecordId {
    fn into_record_id(self) -> Result<RecordId, InvalidRecordId>;
}

impl IntoRecordId for RecordId {
    fn into_record_id(self) -> Result<RecordId, InvalidRecordId> {
        Ok(self)
    }
}

impl IntoRecordId for i64 {
    fn into_record_id(self) -> Result<RecordId, InvalidRecordId> {
        Ok(RecordId(self))
    }
}

impl IntoRecordId for &str {
    fn into_record_id(self) -> Result<RecordId, InvalidRecordId> {
        self.parse()
    }
}

impl IntoRecordId for &String {
    fn into_record_id(self) -> Result<RecordId, InvalidRecordId> {
        self.parse()
    }
}

impl IntoRecordId for String {
    fn into_record_id(self) -> Result<RecordId, InvalidRecordId> {
        self.parse()
    }
}

/// Current list window plus the total count reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            total: 0,
        }
    }
}

impl Pagination {
    /// Build pagination from the raw `x-total-count` header value.
    ///
    /// A missing or unparsable header falls back to the length of the page
    /// that was actually returned.
    pub fn from_total_header(page: u32, limit: u32, header: Option<&str>, page_len: usize) -> Self {
        let total = header
            .and_then(|h| h.trim().parse::<u64>().ok())
            .unwrap_or(page_len as u64);
        Self { page, limit, total }
    }

    /// `ceil(total / limit)`, zero when `limit` is zero.
    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.limit))
    }
}
