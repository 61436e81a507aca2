//! App model - a top-level application grouping groups and scopes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::EntityRecord;
use crate::entity::EntityKind;

/// App row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct App {
    pub id: i64,
    /// External identifier handed to relying parties
    pub uuid: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl EntityRecord for App {
    const KIND: EntityKind = EntityKind::App;

    fn record_id(&self) -> i64 {
        self.id
    }

    fn display_label(&self) -> String {
        self.name.clone()
    }
}

/// Create app payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppCreate {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub active: bool,
}

/// Update app payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AppUpdate {
    #[validate(length(min = 1, max = 128))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
