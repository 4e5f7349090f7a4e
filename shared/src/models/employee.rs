//! Employee Model

use serde::{Deserialize, Serialize};

use super::Record;
use crate::types::RecordId;

/// Employee gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

/// Employee entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    /// Two uppercase letters followed by seven digits
    pub passport: String,
    /// ISO date (`YYYY-MM-DD`)
    pub birth_date: String,
    pub gender: Gender,
    #[serde(default)]
    pub is_active: bool,
}

impl Record for Employee {
    fn record_id(&self) -> RecordId {
        RecordId(self.id)
    }
}

/// Create / full-replace employee payload
///
/// Mirrors the edit form, so `gender` may still be unset before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    pub passport: String,
    pub birth_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    pub is_active: bool,
}

impl From<Employee> for NewEmployee {
    fn from(e: Employee) -> Self {
        Self {
            name: e.name,
            passport: e.passport,
            birth_date: e.birth_date,
            gender: Some(e.gender),
            is_active: e.is_active,
        }
    }
}
