//! List query types
//!
//! Paginated list requests and the filters that narrow them, both on the
//! server (as query parameters) and locally over an already loaded page.

use serde::{Deserialize, Serialize};

use crate::models::{Document, DocumentType};

/// Filter applied to a list of `T`.
pub trait ListFilter<T>: Clone + Default + Send + Sync + 'static {
    /// Query parameters for every criterion that is set, in a stable order
    fn query_pairs(&self) -> Vec<(&'static str, String)>;

    /// Whether `item` satisfies every criterion that is set
    fn matches(&self, item: &T) -> bool;
}

/// Filter type for lists that have no criteria.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoFilter;

impl<T> ListFilter<T> for NoFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn matches(&self, _item: &T) -> bool {
        true
    }
}

/// Document list filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFilters {
    pub employee_id: Option<i64>,
    #[serde(rename = "type")]
    pub doc_type: Option<DocumentType>,
}

impl DocumentFilters {
    pub fn employee(employee_id: i64) -> Self {
        Self {
            employee_id: Some(employee_id),
            doc_type: None,
        }
    }

    pub fn of_type(doc_type: DocumentType) -> Self {
        Self {
            employee_id: None,
            doc_type: Some(doc_type),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.employee_id.is_none() && self.doc_type.is_none()
    }

    /// Overwrite only the fields named in `patch`
    pub fn merge(&mut self, patch: DocumentFilterPatch) {
        if let Some(employee_id) = patch.employee_id {
            self.employee_id = employee_id;
        }
        if let Some(doc_type) = patch.doc_type {
            self.doc_type = doc_type;
        }
    }
}

impl ListFilter<Document> for DocumentFilters {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(employee_id) = self.employee_id {
            pairs.push(("employeeId", employee_id.to_string()));
        }
        if let Some(doc_type) = self.doc_type {
            pairs.push(("type", doc_type.as_str().to_string()));
        }
        pairs
    }

    fn matches(&self, item: &Document) -> bool {
        self.employee_id.is_none_or(|id| item.employee_id == id)
            && self.doc_type.is_none_or(|t| item.doc_type == t)
    }
}

/// Partial update for [`DocumentFilters`].
///
/// The outer `Option` says whether the field is touched, the inner one is the
/// new value (`None` clears it).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentFilterPatch {
    pub employee_id: Option<Option<i64>>,
    pub doc_type: Option<Option<DocumentType>>,
}

impl DocumentFilterPatch {
    pub fn employee_id(mut self, employee_id: Option<i64>) -> Self {
        self.employee_id = Some(employee_id);
        self
    }

    pub fn doc_type(mut self, doc_type: Option<DocumentType>) -> Self {
        self.doc_type = Some(doc_type);
        self
    }
}

/// Paginated list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Page number (1-based)
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Extra filter parameters
    pub params: Vec<(&'static str, String)>,
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            params: Vec::new(),
        }
    }

    /// Append every set criterion of `filter`
    pub fn filtered<T, F: ListFilter<T>>(mut self, filter: &F) -> Self {
        self.params.extend(filter.query_pairs());
        self
    }

    /// `_page=..&_limit=..` followed by the filter parameters.
    ///
    /// Values are integers or enum tokens, so no percent-encoding is needed.
    pub fn to_query_string(&self) -> String {
        let mut qs = format!("_page={}&_limit={}", self.page, self.limit);
        for (key, value) in &self.params {
            qs.push('&');
            qs.push_str(key);
            qs.push('=');
            qs.push_str(value);
        }
        qs
    }
}
