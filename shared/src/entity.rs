//! Entity kinds and endpoint path construction
//!
//! Every Blue Admin endpoint path is derived from the entity kind (and,
//! for relationship endpoints, the owner/related pair). Centralizing the
//! construction here keeps the path grammar in exactly one place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// API route prefix shared by every admin endpoint
pub const API_PREFIX: &str = "blue_admin";

/// The five administered resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    User,
    Group,
    Scope,
    Resource,
    App,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::User,
        EntityKind::Group,
        EntityKind::Scope,
        EntityKind::Resource,
        EntityKind::App,
    ];

    /// Lowercase path segment used in every endpoint
    pub fn path_segment(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Group => "group",
            EntityKind::Scope => "scope",
            EntityKind::Resource => "resource",
            EntityKind::App => "app",
        }
    }

    /// Human-readable singular label
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::User => "User",
            EntityKind::Group => "Group",
            EntityKind::Scope => "Scope",
            EntityKind::Resource => "Resource",
            EntityKind::App => "App",
        }
    }

    /// `GET`/`POST` collection path: `blue_admin/{E}`
    pub fn collection_path(&self) -> String {
        format!("{}/{}", API_PREFIX, self.path_segment())
    }

    /// Single-entity path: `blue_admin/{E}/{id}`
    pub fn detail_path(&self, id: i64) -> String {
        format!("{}/{}/{}", API_PREFIX, self.path_segment(), id)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A directed relation between an owner entity and a related entity.
///
/// The API spells relationship endpoints by concatenating the two
/// segments: `usergroup`, `scopecomplementuser`, and so on. The
/// "complement" endpoint lists candidates not yet linked; the
/// "noncomplement" endpoint lists what is currently linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Relation {
    pub owner: EntityKind,
    pub related: EntityKind,
}

impl Relation {
    pub const USER_GROUPS: Relation = Relation {
        owner: EntityKind::User,
        related: EntityKind::Group,
    };
    pub const USER_SCOPES: Relation = Relation {
        owner: EntityKind::User,
        related: EntityKind::Scope,
    };
    pub const GROUP_USERS: Relation = Relation {
        owner: EntityKind::Group,
        related: EntityKind::User,
    };
    pub const GROUP_SCOPES: Relation = Relation {
        owner: EntityKind::Group,
        related: EntityKind::Scope,
    };
    pub const SCOPE_USERS: Relation = Relation {
        owner: EntityKind::Scope,
        related: EntityKind::User,
    };
    pub const SCOPE_GROUPS: Relation = Relation {
        owner: EntityKind::Scope,
        related: EntityKind::Group,
    };
    pub const SCOPE_RESOURCES: Relation = Relation {
        owner: EntityKind::Scope,
        related: EntityKind::Resource,
    };
    pub const APP_GROUPS: Relation = Relation {
        owner: EntityKind::App,
        related: EntityKind::Group,
    };
    pub const APP_SCOPES: Relation = Relation {
        owner: EntityKind::App,
        related: EntityKind::Scope,
    };

    pub fn new(owner: EntityKind, related: EntityKind) -> Self {
        Self { owner, related }
    }

    /// Linked-list path: `blue_admin/{E}{relatedE}/{ownerId}`
    pub fn list_path(&self, owner_id: i64) -> String {
        format!(
            "{}/{}{}/{}",
            API_PREFIX,
            self.owner.path_segment(),
            self.related.path_segment(),
            owner_id
        )
    }

    /// Candidates not yet linked: `blue_admin/{relatedE}complement{E}/{ownerId}`
    pub fn available_path(&self, owner_id: i64) -> String {
        format!(
            "{}/{}complement{}/{}",
            API_PREFIX,
            self.related.path_segment(),
            self.owner.path_segment(),
            owner_id
        )
    }

    /// Currently linked: `blue_admin/{relatedE}noncomplement{E}/{ownerId}`
    pub fn attached_path(&self, owner_id: i64) -> String {
        format!(
            "{}/{}noncomplement{}/{}",
            API_PREFIX,
            self.related.path_segment(),
            self.owner.path_segment(),
            owner_id
        )
    }

    /// Attach/detach path: `blue_admin/{E}{relatedE}/{relatedId}/{ownerId}`
    pub fn link_path(&self, related_id: i64, owner_id: i64) -> String {
        format!(
            "{}/{}{}/{}/{}",
            API_PREFIX,
            self.owner.path_segment(),
            self.related.path_segment(),
            related_id,
            owner_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_and_detail_paths() {
        assert_eq!(EntityKind::User.collection_path(), "blue_admin/user");
        assert_eq!(EntityKind::Scope.detail_path(7), "blue_admin/scope/7");
    }

    #[test]
    fn relation_paths_follow_api_grammar() {
        let rel = Relation::USER_GROUPS;
        assert_eq!(rel.list_path(3), "blue_admin/usergroup/3");
        assert_eq!(rel.available_path(3), "blue_admin/groupcomplementuser/3");
        assert_eq!(rel.attached_path(3), "blue_admin/groupnoncomplementuser/3");
        assert_eq!(rel.link_path(9, 3), "blue_admin/usergroup/9/3");
    }

    #[test]
    fn scope_resource_relation_paths() {
        let rel = Relation::SCOPE_RESOURCES;
        assert_eq!(rel.available_path(1), "blue_admin/resourcecomplementscope/1");
        assert_eq!(rel.link_path(4, 1), "blue_admin/scoperesource/4/1");
    }
}
