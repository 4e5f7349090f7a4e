//! Document Model

use serde::{Deserialize, Serialize};

use super::Record;
use crate::types::RecordId;

/// Document kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Invoice,
    PowerOfAttorney,
}

impl DocumentType {
    /// Wire value, also used as the `type` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "invoice",
            DocumentType::PowerOfAttorney => "power_of_attorney",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invoice subtype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceType {
    Standard,
    Additional,
}

/// Document entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub number: String,
    pub date: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_type: Option<InvoiceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attorney_name: Option<String>,
    /// Owning employee (not checked client-side)
    pub employee_id: i64,
}

impl Record for Document {
    fn record_id(&self) -> RecordId {
        RecordId(self.id)
    }
}

/// Create / full-replace document payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<DocumentType>,
    pub number: String,
    pub date: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_type: Option<InvoiceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attorney_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<i64>,
}

impl From<Document> for NewDocument {
    fn from(d: Document) -> Self {
        Self {
            doc_type: Some(d.doc_type),
            number: d.number,
            date: d.date,
            description: d.description,
            invoice_type: d.invoice_type,
            attorney_name: d.attorney_name,
            employee_id: Some(d.employee_id),
        }
    }
}
