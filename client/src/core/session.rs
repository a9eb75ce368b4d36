//! # Session Store
//!
//! Holds the bearer token and the logged-in user. The HTTP client reads the
//! token for every request and clears the session when the backend answers
//! 401. When a session file is configured, logins are persisted as JSON so the
//! CLI stays logged in between invocations.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use shared::{AuthResponse, User};

use super::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
struct StoredSession {
    token: String,
    user: User,
}

/// Shared, cheaply clonable session handle.
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<Option<StoredSession>>>,
    path: Option<PathBuf>,
}

impl Session {
    /// Session that lives only in memory.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Session backed by `path`. A missing file means "logged out".
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let stored = match fs::read_to_string(&path) {
            Ok(raw) => Some(serde_json::from_str::<StoredSession>(&raw).map_err(|e| {
                AppError::Session(format!("Corrupt session file {}: {}", path.display(), e))
            })?),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), logged_in = stored.is_some(), "Session loaded");

        Ok(Self {
            inner: Arc::new(RwLock::new(stored)),
            path: Some(path),
        })
    }

    pub fn token(&self) -> Option<String> {
        self.inner.read().as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.inner.read().as_ref().map(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().is_some()
    }

    /// Current user, or a session error telling the caller to log in.
    pub fn require_user(&self) -> Result<User> {
        self.user()
            .ok_or_else(|| AppError::Session("Not logged in. Run `ipl login` first.".to_string()))
    }

    /// Store a successful login and persist it.
    pub fn store(&self, auth: &AuthResponse) -> Result<()> {
        let stored = StoredSession {
            token: auth.token.clone(),
            user: auth.user.clone(),
        };

        if let Some(path) = &self.path {
            write_session_file(path, &stored)?;
        }

        *self.inner.write() = Some(stored);
        Ok(())
    }

    /// Forget the session. Removing the file is best-effort.
    pub fn clear(&self) {
        let had_session = self.inner.write().take().is_some();

        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to remove session file");
                }
            }
        }

        if had_session {
            tracing::info!("Session cleared");
        }
    }
}

fn write_session_file(path: &Path, stored: &StoredSession) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string_pretty(stored)?;
    fs::write(path, raw)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::UserRole;

    fn auth() -> AuthResponse {
        AuthResponse {
            token: "tok-123".to_string(),
            user: User {
                id: "u1".to_string(),
                name: "Budi".to_string(),
                email: "budi@example.com".to_string(),
                role: UserRole::Resident,
                house_number: Some("A-3".to_string()),
                phone: None,
                created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            },
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ipl-session-{}-{}.json", name, uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_in_memory_store_and_clear() {
        let session = Session::in_memory();
        assert!(session.require_user().is_err());

        session.store(&auth()).unwrap();
        assert_eq!(session.token().as_deref(), Some("tok-123"));
        assert_eq!(session.require_user().unwrap().name, "Budi");

        session.clear();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_persisted_session_round_trips_through_file() {
        let path = temp_path("persist");
        Session::load(&path).unwrap().store(&auth()).unwrap();

        let reloaded = Session::load(&path).unwrap();
        assert_eq!(reloaded.token().as_deref(), Some("tok-123"));

        reloaded.clear();
        assert!(!path.exists());
        assert!(!Session::load(&path).unwrap().is_authenticated());
    }

    #[test]
    fn test_clones_share_state() {
        let session = Session::in_memory();
        let clone = session.clone();
        session.store(&auth()).unwrap();
        assert!(clone.is_authenticated());
        clone.clear();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_corrupt_file_is_a_session_error() {
        let path = temp_path("corrupt");
        fs::write(&path, "{not json").unwrap();
        let err = Session::load(&path).unwrap_err();
        assert!(matches!(err, AppError::Session(_)));
        let _ = fs::remove_file(&path);
    }
}
