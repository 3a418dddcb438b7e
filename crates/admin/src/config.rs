//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPDESK_API_BASE_URL` - Base URL of the store backend REST API
//!
//! ## Optional
//! - `SHOPDESK_API_TOKEN` - Bearer token (overrides the persisted session)
//! - `SHOPDESK_SESSION_PATH` - Session file (default: `<data dir>/shopdesk/session.json`)
//! - `SHOPDESK_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `SHOPDESK_UPLOAD_TIMEOUT_SECS` - Upload abort timeout (default: 120)
//! - `SHOPDESK_REORDER_MODE` - `sequential`, `saga` or `batch` (default: saga)
//! - `SHOPDESK_LOG_FORMAT` - `text` or `json` (default: text)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

use crate::reorder::ReorderMode;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 120;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "xxx",
    "todo",
    "insert",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format for the CLI subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Admin client configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct ClientConfig {
    /// Backend base URL, always ending in `/`
    pub base_url: Url,
    /// Explicit bearer token; takes precedence over the session file
    pub token: Option<SecretString>,
    /// Where the persisted session lives
    pub session_path: PathBuf,
    /// Timeout applied to every request
    pub request_timeout: Duration,
    /// Timeout after which an upload is aborted
    pub upload_timeout: Duration,
    /// How reordered lists are persisted
    pub reorder_mode: ReorderMode,
    /// Log output format
    pub log_format: LogFormat,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("session_path", &self.session_path)
            .field("request_timeout", &self.request_timeout)
            .field("upload_timeout", &self.upload_timeout)
            .field("reorder_mode", &self.reorder_mode)
            .field("log_format", &self.log_format)
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
    /// Returns `ConfigError` if the base URL is missing or any variable is
    /// malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_base = lookup("SHOPDESK_API_BASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("SHOPDESK_API_BASE_URL".to_string()))?;
        let base_url = parse_base_url(&raw_base).map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPDESK_API_BASE_URL".to_string(), e.to_string())
        })?;

        let token = lookup("SHOPDESK_API_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .map(|t| {
                if looks_like_placeholder(&t) {
                    tracing::warn!("SHOPDESK_API_TOKEN looks like a placeholder value");
                }
                SecretString::from(t)
            });

        let session_path = session_path_from_lookup(&lookup)?;

        let request_timeout = Duration::from_secs(parse_secs(
            &lookup,
            "SHOPDESK_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        )?);
        let upload_timeout = Duration::from_secs(parse_secs(
            &lookup,
            "SHOPDESK_UPLOAD_TIMEOUT_SECS",
            DEFAULT_UPLOAD_TIMEOUT_SECS,
        )?);

        let reorder_mode = lookup("SHOPDESK_REORDER_MODE")
            .map(|m| {
                m.parse::<ReorderMode>().map_err(|e| {
                    ConfigError::InvalidEnvVar("SHOPDESK_REORDER_MODE".to_string(), e)
                })
            })
            .transpose()?
            .unwrap_or_default();

        let log_format = match lookup("SHOPDESK_LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "SHOPDESK_LOG_FORMAT".to_string(),
                    format!("expected text or json, got {other}"),
                ));
            }
        };

        Ok(Self {
            base_url,
            token,
            session_path,
            request_timeout,
            upload_timeout,
            reorder_mode,
            log_format,
        })
    }

    /// Minimal configuration pointing at `base_url`, used by tests and tools
    /// that manage the session themselves.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if `base_url` is not an absolute URL.
    pub fn for_base_url(base_url: &str, session_path: PathBuf) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            token: None,
            session_path,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            upload_timeout: Duration::from_secs(DEFAULT_UPLOAD_TIMEOUT_SECS),
            reorder_mode: ReorderMode::default(),
            log_format: LogFormat::Text,
        })
    }

    /// Whether an explicit token was configured.
    #[must_use]
    pub fn has_explicit_token(&self) -> bool {
        self.token
            .as_ref()
            .is_some_and(|t| !t.expose_secret().is_empty())
    }
}

/// Session file location without requiring the rest of the configuration.
///
/// Calls `dotenvy::dotenv()` to load from `.env` file if present.
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` if no path is configured and no
/// data or home directory can be found.
pub fn session_path_from_env() -> Result<PathBuf, ConfigError> {
    let _ = dotenvy::dotenv();
    session_path_from_lookup(&|key: &str| std::env::var(key).ok())
}

// =============================================================================
// Helper Functions
// =============================================================================

fn session_path_from_lookup(
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<PathBuf, ConfigError> {
    match lookup("SHOPDESK_SESSION_PATH") {
        Some(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => default_session_path(),
    }
}

/// Parse the base URL and make sure relative joins keep its path prefix.
fn parse_base_url(raw: &str) -> Result<Url, url::ParseError> {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("{trimmed}/"))
    }
}

fn parse_secs(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> Result<u64, ConfigError> {
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

fn default_session_path() -> Result<PathBuf, ConfigError> {
    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("shopdesk").join("session.json"));
    }
    if let Some(home) = dirs::home_dir() {
        return Ok(home.join(".shopdesk").join("session.json"));
    }
    Err(ConfigError::MissingEnvVar(
        "SHOPDESK_SESSION_PATH (no data or home directory found)".to_string(),
    ))
}

fn looks_like_placeholder(value: &str) -> bool {
    let lower = value.to_lowercase();
    PLACEHOLDER_PATTERNS.iter().any(|p| lower.contains(p))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_base_url() {
        let err = ClientConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "SHOPDESK_API_BASE_URL"));
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("SHOPDESK_API_BASE_URL", "https://api.example.test/api"),
            ("SHOPDESK_SESSION_PATH", "/tmp/shopdesk-session.json"),
        ]))
        .unwrap();

        assert_eq!(config.base_url.as_str(), "https://api.example.test/api/");
        assert!(config.token.is_none());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.upload_timeout, Duration::from_secs(120));
        assert_eq!(config.reorder_mode, ReorderMode::Saga);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_invalid_timeout() {
        let err = ClientConfig::from_lookup(lookup_from(&[
            ("SHOPDESK_API_BASE_URL", "https://api.example.test"),
            ("SHOPDESK_SESSION_PATH", "/tmp/s.json"),
            ("SHOPDESK_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "SHOPDESK_TIMEOUT_SECS"));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ClientConfig::from_lookup(lookup_from(&[(
            "SHOPDESK_API_BASE_URL",
            "not a url",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_reorder_mode_and_log_format() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("SHOPDESK_API_BASE_URL", "http://localhost:5000"),
            ("SHOPDESK_SESSION_PATH", "/tmp/s.json"),
            ("SHOPDESK_REORDER_MODE", "batch"),
            ("SHOPDESK_LOG_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(config.reorder_mode, ReorderMode::Batch);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("SHOPDESK_API_BASE_URL", "http://localhost:5000"),
            ("SHOPDESK_SESSION_PATH", "/tmp/s.json"),
            ("SHOPDESK_API_TOKEN", "  "),
        ]))
        .unwrap();
        assert!(!config.has_explicit_token());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("SHOPDESK_API_BASE_URL", "http://localhost:5000"),
            ("SHOPDESK_SESSION_PATH", "/tmp/s.json"),
            ("SHOPDESK_API_TOKEN", "eyJhbGciOiJIUzI1NiJ9.super-secret"),
        ]))
        .unwrap();

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret"));
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(looks_like_placeholder("your-token-here"));
        assert!(!looks_like_placeholder("eyJhbGciOiJIUzI1NiJ9"));
    }
}
