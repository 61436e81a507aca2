//! Generic per-entity CRUD service

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::models::EntityRecord;
use shared::Envelope;
use std::marker::PhantomData;

use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;
use crate::query::{ListQuery, Page};

/// CRUD operations for one entity kind.
///
/// Paths are derived from `T::KIND`; the service itself is stateless
/// and cheap to clone.
#[derive(Debug, Clone)]
pub struct EntityService<T> {
    api: ApiClient,
    _marker: PhantomData<fn() -> T>,
}

impl<T> EntityService<T>
where
    T: EntityRecord + DeserializeOwned,
{
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _marker: PhantomData,
        }
    }

    /// List a page of entities with the given filters
    pub async fn list(&self, query: &ListQuery) -> ClientResult<Page<T>> {
        let env = self
            .api
            .get(&T::KIND.collection_path(), &query.to_params())
            .await?;
        Page::from_envelope(env)
    }

    /// Fetch a single entity by id
    pub async fn get(&self, id: i64) -> ClientResult<T> {
        let env: Envelope<T> = self.api.get(&T::KIND.detail_path(id), &[]).await?;
        unwrap_envelope(env)
    }

    /// Create a new entity from a payload
    pub async fn create<P: Serialize>(&self, payload: &P) -> ClientResult<T> {
        let env: Envelope<T> = self.api.post(&T::KIND.collection_path(), payload).await?;
        unwrap_envelope(env)
    }

    /// Patch an existing entity
    pub async fn update<P: Serialize>(&self, id: i64, payload: &P) -> ClientResult<T> {
        let env: Envelope<T> = self.api.patch(&T::KIND.detail_path(id), payload).await?;
        unwrap_envelope(env)
    }

    /// Delete an entity. Irreversible from the client's perspective.
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        let env: Envelope<serde_json::Value> = self.api.delete(&T::KIND.detail_path(id)).await?;
        if !env.success {
            return Err(ClientError::Api {
                status: 200,
                detail: env.details,
            });
        }
        Ok(())
    }
}

pub(crate) fn unwrap_envelope<T>(env: Envelope<T>) -> ClientResult<T> {
    env.into_data().map_err(|detail| ClientError::Api {
        status: 200,
        detail,
    })
}
