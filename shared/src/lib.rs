//! Shared types for the Blue Admin console and client
//!
//! Wire types for the `/blue_admin` REST API, shared between the API
//! client crate and the console UI.

pub mod auth;
pub mod entity;
pub mod models;
pub mod response;

pub use auth::{LoginRequest, LoginResponse, UserInfo};
pub use entity::{EntityKind, Relation};
pub use response::{Envelope, PagedEnvelope};
