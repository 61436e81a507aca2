//! Blue Client - typed client for the Blue Admin API
//!
//! Provides the HTTP wrapper, session lifecycle, and per-entity
//! services (CRUD plus relationship endpoints) over the `/blue_admin`
//! REST surface.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod services;
pub mod session;

pub use client::BlueAdminClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::ApiClient;
pub use query::{ListQuery, Page, GLOBAL_SEARCH_KEY};
pub use services::{AuthService, EntityService, RelationEndpoint};
pub use session::{Session, SessionData, SessionStore};

// Re-export shared types for convenience
pub use shared::{EntityKind, Envelope, LoginRequest, LoginResponse, PagedEnvelope, Relation, UserInfo};
