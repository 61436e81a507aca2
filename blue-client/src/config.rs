//! Client configuration

use std::path::PathBuf;

/// Configuration for connecting to the Blue Admin backend
///
/// # Environment variables
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | BLUE_ADMIN_URL | http://localhost:8000 | API base URL |
/// | BLUE_REQUEST_TIMEOUT_MS | 30000 | Per-request timeout |
/// | BLUE_CREDENTIAL_DIR | ~/.blue-admin | Session credential directory |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g. "http://localhost:8000")
    pub base_url: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// Directory holding the persisted session credential file.
    /// `None` keeps the session in memory only.
    pub credential_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a new configuration for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: 30_000,
            credential_dir: None,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("BLUE_ADMIN_URL").unwrap_or_else(|_| "http://localhost:8000".into());
        let timeout_ms = std::env::var("BLUE_REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30_000);
        let credential_dir = std::env::var("BLUE_CREDENTIAL_DIR")
            .map(PathBuf::from)
            .ok()
            .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".blue-admin")));

        Self {
            base_url,
            timeout_ms,
            credential_dir,
        }
    }

    /// Set the request timeout
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the credential directory
    pub fn with_credential_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.credential_dir = Some(dir.into());
        self
    }

    /// Keep the session in memory only (tests, one-shot scripts)
    pub fn without_persistence(mut self) -> Self {
        self.credential_dir = None;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}
