//! Auth API DTOs
//!
//! Request/response types for `POST /auth/login` and the session
//! profile stored on the client after a successful login.

use serde::{Deserialize, Serialize};

/// Login request
///
/// The backend accepts either username or email identification,
/// selected via `grant_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub grant_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
    /// Opaque pre-auth token, empty unless the server handed one out
    #[serde(default)]
    pub token: String,
}

impl LoginRequest {
    /// Login with a username
    pub fn with_username(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            grant_type: "authorization_code".to_string(),
            username: Some(username.into()),
            email: None,
            password: password.into(),
            token: String::new(),
        }
    }

    /// Login with an email address
    pub fn with_email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            grant_type: "authorization_code".to_string(),
            username: None,
            email: Some(email.into()),
            password: password.into(),
            token: String::new(),
        }
    }
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    pub user: UserInfo,
}

/// Authenticated user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl UserInfo {
    /// Display name for the console header
    pub fn display_name(&self) -> String {
        if self.first_name.is_empty() && self.last_name.is_empty() {
            self.username.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
                .trim()
                .to_string()
        }
    }
}
