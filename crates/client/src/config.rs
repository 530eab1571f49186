//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `GROUNDSWELL_STORE_URL` - Base URL of the hosted document API
//! - `GROUNDSWELL_STORE_TOKEN` - Bearer token for the document API
//!
//! ## Optional
//! - `GROUNDSWELL_AUTH_UID` - Authenticated user id; absent means anonymous
//!   (read-only)
//! - `GROUNDSWELL_AUTH_NAME` - Display name for the authenticated user
//! - `GROUNDSWELL_CACHE_TTL_SECS` - Read-cache TTL in seconds (default: 300)
//! - `GROUNDSWELL_WATCH_POLL_MS` - Subscription poll interval in milliseconds
//!   (default: 2000)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use groundswell_core::Principal;

const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_WATCH_POLL_MS: u64 = 2000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
///
/// Implements `Debug` manually to redact the store token.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the hosted document API.
    pub store_url: Url,
    /// Bearer token for the document API.
    pub store_token: SecretString,
    /// The authenticated principal, if any. `None` means anonymous/read-only.
    pub principal: Option<Principal>,
    /// TTL for the repository's read cache.
    pub cache_ttl: Duration,
    /// Poll interval used to maintain project subscriptions.
    pub watch_poll_interval: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("store_url", &self.store_url.as_str())
            .field("store_token", &"[REDACTED]")
            .field("principal", &self.principal)
            .field("cache_ttl", &self.cache_ttl)
            .field("watch_poll_interval", &self.watch_poll_interval)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let store_url = parse_url("GROUNDSWELL_STORE_URL", &get_required_env("GROUNDSWELL_STORE_URL")?)?;
        let store_token = SecretString::from(get_required_env("GROUNDSWELL_STORE_TOKEN")?);

        let principal = get_optional_env("GROUNDSWELL_AUTH_UID")
            .map(|uid| Principal::new(uid, get_optional_env("GROUNDSWELL_AUTH_NAME")));

        let cache_ttl_secs = parse_u64(
            "GROUNDSWELL_CACHE_TTL_SECS",
            &get_env_or_default("GROUNDSWELL_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS),
        )?;
        let watch_poll_ms = parse_u64(
            "GROUNDSWELL_WATCH_POLL_MS",
            &get_env_or_default("GROUNDSWELL_WATCH_POLL_MS", DEFAULT_WATCH_POLL_MS),
        )?;

        Ok(Self {
            store_url,
            store_token,
            principal,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            watch_poll_interval: Duration::from_millis(watch_poll_ms),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: u64) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
