//! Persisted client session.
//!
//! The auth token and the signed-in admin's profile are kept in a small JSON
//! file so every command can authenticate without a login round trip. The
//! file is read once when an [`ApiClient`](crate::client::ApiClient) is
//! built and removed on logout.

use std::io::Write;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use shopdesk_core::{AdminRole, AdminUserId};
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors that can occur while reading or writing the session file.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Filesystem access failed.
    #[error("Session file error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The session file is not valid JSON.
    #[error("Corrupt session file at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Profile of the signed-in admin, as returned by the backend at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    #[serde(alias = "_id")]
    pub id: AdminUserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: AdminRole,
}

/// A stored session.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct Session {
    /// Bearer token for authenticated requests.
    pub token: SecretString,
    /// Signed-in admin, when known.
    pub user: Option<AdminProfile>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

/// On-disk shape of the session file.
#[derive(Serialize, Deserialize)]
struct SessionFile {
    token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<AdminProfile>,
}

/// Reads and writes the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store backed by `path`. Nothing is read until [`load`](Self::load).
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the file exists but cannot be read or parsed.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No stored session");
                return Ok(None);
            }
            Err(source) => {
                return Err(SessionError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let file: SessionFile =
            serde_json::from_str(&raw).map_err(|source| SessionError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        if file.token.is_empty() {
            return Ok(None);
        }

        Ok(Some(Session {
            token: SecretString::from(file.token),
            user: file.user,
        }))
    }

    /// Persist `session`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the directory or file cannot be written.
    /// On unix the file is readable by its owner only.
    #[instrument(skip(self, session), fields(path = %self.path.display()))]
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| SessionError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let file = SessionFile {
            token: session.token.expose_secret().to_string(),
            user: session.user.clone(),
        };
        let json = serde_json::to_string_pretty(&file).map_err(|source| SessionError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        // Written to an owner-only temp file, then renamed over the old session.
        let io_err = |source| SessionError::Io {
            path: self.path.clone(),
            source,
        };
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(json.as_bytes()).map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        debug!("Session saved");
        Ok(())
    }

    /// Remove the stored session. Clearing an absent session is not an error.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the file exists but cannot be removed.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn profile() -> AdminProfile {
        AdminProfile {
            id: AdminUserId::new("u1"),
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            role: AdminRole::Manager,
        }
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));

        store
            .save(&Session {
                token: SecretString::from("tok-123"),
                user: Some(profile()),
            })
            .unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.token.expose_secret(), "tok-123");
        assert_eq!(loaded.user, Some(profile()));
    }

    #[test]
    fn test_clear_removes_session_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        store
            .save(&Session {
                token: SecretString::from("tok"),
                user: None,
            })
            .unwrap();

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_session_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = SessionStore::new(&path);
        store
            .save(&Session {
                token: SecretString::from("tok"),
                user: None,
            })
            .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().unwrap().unwrap().token.expose_secret(), "tok");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = SessionStore::new(&path).load().unwrap_err();
        assert!(matches!(err, SessionError::Corrupt { .. }));
    }

    #[test]
    fn test_profile_accepts_mongo_style_id() {
        let json = r#"{"_id":"abc","name":"Sam","email":"sam@example.com","role":"admin"}"#;
        let profile: AdminProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id.as_str(), "abc");
        assert_eq!(profile.role, AdminRole::Admin);
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let session = Session {
            token: SecretString::from("very-secret-token"),
            user: None,
        };
        let out = format!("{session:?}");
        assert!(!out.contains("very-secret-token"));
        assert!(out.contains("[REDACTED]"));
    }
}
