//! Login/logout flow

use shared::{Envelope, LoginRequest, LoginResponse, UserInfo};

use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;

/// Auth path, outside the admin prefix
const LOGIN_PATH: &str = "auth/login";

/// Login/logout against the SSO auth endpoint.
///
/// A successful login stores the tokens and user profile in the shared
/// session, which the HTTP layer then attaches to every request.
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Authenticate and populate the session
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<UserInfo> {
        let env: Envelope<LoginResponse> = self.api.post(LOGIN_PATH, request).await?;
        let login = env.into_data().map_err(|detail| ClientError::Api {
            status: 200,
            detail,
        })?;

        self.api.session().set_login(
            login.access_token,
            login.refresh_token,
            login.user.clone(),
        );
        tracing::info!(user = %login.user.username, "login successful");
        Ok(login.user)
    }

    /// Synchronously clear the session. Requests issued afterwards are
    /// unauthenticated and will bounce off the server's 401.
    pub fn logout(&self) {
        self.api.session().clear();
        tracing::info!("logged out");
    }

    /// Profile of the logged-in administrator, if any
    pub fn current_user(&self) -> Option<UserInfo> {
        self.api.session().user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.api.session().is_authenticated()
    }
}
