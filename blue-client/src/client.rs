//! Facade client
//!
//! `BlueAdminClient` bundles the HTTP wrapper with typed accessors for
//! every entity service and relationship endpoint the admin API
//! exposes.

use shared::models::{App, Group, Resource, Scope, User};
use shared::Relation;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::ApiClient;
use crate::services::{AuthService, EntityService, RelationEndpoint};
use crate::session::Session;

/// Typed client for the Blue Admin backend
#[derive(Debug, Clone)]
pub struct BlueAdminClient {
    api: ApiClient,
}

impl BlueAdminClient {
    /// Build a client, loading any persisted session credential
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let session = match &config.credential_dir {
            Some(dir) => Session::init(dir),
            None => Session::in_memory(),
        };
        Self::with_session(config, session)
    }

    /// Build a client around an externally managed session (tests)
    pub fn with_session(config: &ClientConfig, session: Session) -> ClientResult<Self> {
        Ok(Self {
            api: ApiClient::new(config, session)?,
        })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &Session {
        self.api.session()
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.api.clone())
    }

    // ========== Entity CRUD ==========

    pub fn users(&self) -> EntityService<User> {
        EntityService::new(self.api.clone())
    }

    pub fn groups(&self) -> EntityService<Group> {
        EntityService::new(self.api.clone())
    }

    pub fn scopes(&self) -> EntityService<Scope> {
        EntityService::new(self.api.clone())
    }

    pub fn resources(&self) -> EntityService<Resource> {
        EntityService::new(self.api.clone())
    }

    pub fn apps(&self) -> EntityService<App> {
        EntityService::new(self.api.clone())
    }

    // ========== Relationship endpoints ==========

    pub fn user_groups(&self) -> RelationEndpoint<Group> {
        RelationEndpoint::new(self.api.clone(), Relation::USER_GROUPS)
    }

    pub fn user_scopes(&self) -> RelationEndpoint<Scope> {
        RelationEndpoint::new(self.api.clone(), Relation::USER_SCOPES)
    }

    pub fn group_users(&self) -> RelationEndpoint<User> {
        RelationEndpoint::new(self.api.clone(), Relation::GROUP_USERS)
    }

    pub fn group_scopes(&self) -> RelationEndpoint<Scope> {
        RelationEndpoint::new(self.api.clone(), Relation::GROUP_SCOPES)
    }

    pub fn scope_users(&self) -> RelationEndpoint<User> {
        RelationEndpoint::new(self.api.clone(), Relation::SCOPE_USERS)
    }

    pub fn scope_groups(&self) -> RelationEndpoint<Group> {
        RelationEndpoint::new(self.api.clone(), Relation::SCOPE_GROUPS)
    }

    pub fn scope_resources(&self) -> RelationEndpoint<Resource> {
        RelationEndpoint::new(self.api.clone(), Relation::SCOPE_RESOURCES)
    }

    pub fn app_groups(&self) -> RelationEndpoint<Group> {
        RelationEndpoint::new(self.api.clone(), Relation::APP_GROUPS)
    }

    pub fn app_scopes(&self) -> RelationEndpoint<Scope> {
        RelationEndpoint::new(self.api.clone(), Relation::APP_SCOPES)
    }
}
