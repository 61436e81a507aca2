//! Scope model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::EntityRecord;
use crate::entity::EntityKind;

/// Scope row - a named permission unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scope {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl EntityRecord for Scope {
    const KIND: EntityKind = EntityKind::Scope;

    fn record_id(&self) -> i64 {
        self.id
    }

    fn display_label(&self) -> String {
        self.name.clone()
    }
}

/// Create scope payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScopeCreate {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub active: bool,
}

/// Update scope payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ScopeUpdate {
    #[validate(length(min = 1, max = 128))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
