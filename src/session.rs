use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The single piece of durable client-side state: a bearer token whose
/// presence marks the session as authenticated. Private screens are
/// unreachable while it is absent.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct SessionFile {
    token: Option<String>,
}

#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    token: Option<String>,
}

impl Session {
    /// Read the persisted session marker. A missing or unreadable file is an
    /// unauthenticated session, not an error.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let token = std::fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str::<SessionFile>(&content).ok())
            .and_then(|file| file.token)
            .filter(|token| !token.is_empty());
        Self { path, token }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Store the token and persist the marker.
    pub fn login(&mut self, token: String) {
        self.token = Some(token.clone());
        let file = SessionFile { token: Some(token) };
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(&file) {
            Ok(json) => {
                if let Err(err) = std::fs::write(&self.path, json) {
                    tracing::warn!("failed to persist session marker: {err}");
                }
            }
            Err(err) => tracing::warn!("failed to encode session marker: {err}"),
        }
    }

    /// Clear the token and remove the marker file.
    pub fn logout(&mut self) {
        self.token = None;
        if self.path.exists() {
            if let Err(err) = std::fs::remove_file(&self.path) {
                tracing::warn!("failed to remove session marker: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_marker_is_unauthenticated() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::load(dir.path().join("session.json"));
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn login_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let mut session = Session::load(&path);
        session.login("tok-123".into());
        assert!(session.is_authenticated());

        let reloaded = Session::load(&path);
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.token(), Some("tok-123"));
    }

    #[test]
    fn logout_clears_marker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let mut session = Session::load(&path);
        session.login("tok-123".into());
        session.logout();
        assert!(!session.is_authenticated());
        assert!(!path.exists());
        assert!(!Session::load(&path).is_authenticated());
    }

    #[test]
    fn empty_token_counts_as_unauthenticated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"token":""}"#).unwrap();
        assert!(!Session::load(&path).is_authenticated());
    }
}
