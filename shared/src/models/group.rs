//! Group model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::EntityRecord;
use crate::entity::EntityKind;

/// Group row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub active: bool,
    /// Owning app, if the group belongs to one
    #[serde(default)]
    pub app_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl EntityRecord for Group {
    const KIND: EntityKind = EntityKind::Group;

    fn record_id(&self) -> i64 {
        self.id
    }

    fn display_label(&self) -> String {
        self.name.clone()
    }
}

/// Create group payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GroupCreate {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<i64>,
}

/// Update group payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct GroupUpdate {
    #[validate(length(min = 1, max = 128))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<i64>,
}
