//! Relationship endpoint handle
//!
//! Each relation exposes two complementary list queries - "available"
//! (candidates not yet linked) and "attached" (currently linked) - plus
//! attach/detach mutations. The two lists come from distinct server
//! endpoints; callers must not assume the server keeps them disjoint.

use serde::de::DeserializeOwned;
use shared::models::EntityRecord;
use shared::{Envelope, Relation};
use std::marker::PhantomData;

use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;
use crate::query::{ListQuery, Page};

/// Handle for one relation, typed by the related record `R`
#[derive(Debug, Clone)]
pub struct RelationEndpoint<R> {
    api: ApiClient,
    relation: Relation,
    _marker: PhantomData<fn() -> R>,
}

impl<R> RelationEndpoint<R>
where
    R: EntityRecord + DeserializeOwned,
{
    pub fn new(api: ApiClient, relation: Relation) -> Self {
        debug_assert_eq!(relation.related, R::KIND);
        Self {
            api,
            relation,
            _marker: PhantomData,
        }
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// Entities currently linked to the owner (plain relation listing)
    pub async fn list(&self, owner_id: i64, query: &ListQuery) -> ClientResult<Page<R>> {
        let env = self
            .api
            .get(&self.relation.list_path(owner_id), &query.to_params())
            .await?;
        Page::from_envelope(env)
    }

    /// Candidates that can still be linked to the owner
    pub async fn available(&self, owner_id: i64, query: &ListQuery) -> ClientResult<Page<R>> {
        let env = self
            .api
            .get(&self.relation.available_path(owner_id), &query.to_params())
            .await?;
        Page::from_envelope(env)
    }

    /// Entities currently linked to the owner
    pub async fn attached(&self, owner_id: i64, query: &ListQuery) -> ClientResult<Page<R>> {
        let env = self
            .api
            .get(&self.relation.attached_path(owner_id), &query.to_params())
            .await?;
        Page::from_envelope(env)
    }

    /// Attach `related_id` to `owner_id`
    pub async fn add(&self, related_id: i64, owner_id: i64) -> ClientResult<()> {
        let env: Envelope<serde_json::Value> = self
            .api
            .post_empty(&self.relation.link_path(related_id, owner_id))
            .await?;
        check(env)
    }

    /// Detach `related_id` from `owner_id`
    pub async fn remove(&self, related_id: i64, owner_id: i64) -> ClientResult<()> {
        let env: Envelope<serde_json::Value> = self
            .api
            .delete(&self.relation.link_path(related_id, owner_id))
            .await?;
        check(env)
    }
}

fn check(env: Envelope<serde_json::Value>) -> ClientResult<()> {
    if !env.success {
        return Err(ClientError::Api {
            status: 200,
            detail: env.details,
        });
    }
    Ok(())
}
