//! Entity and auth services
//!
//! Thin typed layers over [`ApiClient`](crate::ApiClient): one generic
//! CRUD service per entity kind plus relationship endpoint handles and
//! the login/logout flow.

mod auth;
mod entity;
mod relation;

pub use auth::AuthService;
pub use entity::EntityService;
pub use relation::RelationEndpoint;
