//! Session lifecycle
//!
//! The session token is process-wide state read by every outgoing
//! request. It lives behind an explicit `init` / `get` / `set` /
//! `clear` lifecycle and is injected into the API client rather than
//! read from ambient storage, so it can be mocked in tests.

use serde::{Deserialize, Serialize};
use shared::UserInfo;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Fixed credential filename under the configured directory
const CREDENTIAL_FILE: &str = "session.json";

/// Persisted session payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionData {
    /// Bearer token attached to every request
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Profile of the logged-in administrator
    pub user: Option<UserInfo>,
}

impl SessionData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store tokens and profile after a successful login
    pub fn set_login(&mut self, access_token: String, refresh_token: String, user: UserInfo) {
        self.access_token = Some(access_token);
        self.refresh_token = Some(refresh_token);
        self.user = Some(user);
    }

    /// Drop all session state
    pub fn clear(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
        self.user = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }
}

/// JSON-file persistence for the session credential
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let path = dir.into().join(CREDENTIAL_FILE);
        Self { path }
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn save(&self, data: &SessionData) -> std::io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, json)
    }

    pub fn load(&self) -> Option<SessionData> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&json).ok()
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Shared session handle
///
/// Cloning is cheap; every clone observes the same state. Logout via
/// `clear()` is synchronous - requests issued afterwards go out without
/// a token and rely on the server's 401 for rejection.
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<SessionData>>,
    store: Option<SessionStore>,
}

impl Session {
    /// In-memory session with no persistence
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Session persisted under `dir`, loading any existing credential
    pub fn init(dir: impl Into<PathBuf>) -> Self {
        let store = SessionStore::new(dir);
        let data = store.load().unwrap_or_default();
        Self {
            inner: Arc::new(RwLock::new(data)),
            store: Some(store),
        }
    }

    /// Current bearer token, if logged in
    pub fn token(&self) -> Option<String> {
        self.read(|d| d.access_token.clone())
    }

    /// Current user profile, if logged in
    pub fn user(&self) -> Option<UserInfo> {
        self.read(|d| d.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read(|d| d.access_token.is_some())
    }

    /// Store login state and persist it
    pub fn set_login(&self, access_token: String, refresh_token: String, user: UserInfo) {
        self.write(|d| d.set_login(access_token, refresh_token, user));
        self.persist();
    }

    /// Tear the session down: wipe memory and delete the credential file
    pub fn clear(&self) {
        self.write(SessionData::clear);
        if let Some(store) = &self.store {
            if let Err(e) = store.delete() {
                tracing::warn!("failed to delete session credential: {e}");
            }
        }
    }

    fn persist(&self) {
        if let Some(store) = &self.store {
            let data = self.read(Clone::clone);
            if let Err(e) = store.save(&data) {
                tracing::warn!("failed to persist session credential: {e}");
            }
        }
    }

    fn read<R>(&self, f: impl FnOnce(&SessionData) -> R) -> R {
        match self.inner.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    fn write<R>(&self, f: impl FnOnce(&mut SessionData) -> R) -> R {
        match self.inner.write() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserInfo {
        UserInfo {
            id: 1,
            username: "admin".into(),
            email: "admin@example.com".into(),
            first_name: "Ada".into(),
            last_name: "Admin".into(),
        }
    }

    #[test]
    fn login_and_clear_round_trip() {
        let session = Session::in_memory();
        assert!(!session.is_authenticated());

        session.set_login("tok".into(), "ref".into(), user());
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("tok"));
        assert_eq!(session.user().map(|u| u.username), Some("admin".into()));

        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[test]
    fn clones_share_state() {
        let session = Session::in_memory();
        let other = session.clone();
        session.set_login("tok".into(), String::new(), user());
        assert!(other.is_authenticated());
        other.clear();
        assert!(!session.is_authenticated());
    }
}
