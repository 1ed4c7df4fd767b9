//! Session state and token storage
//!
//! The [`SessionGate`] is a two-state machine (anonymous/authenticated)
//! holding the opaque token issued at login. It is an explicit value passed
//! to whatever issues Store calls; there is no process-global token, so
//! tests can construct gates in arbitrary states.
//!
//! Token persistence across runs is a separate concern: [`TokenFile`] reads
//! and writes the token under the platform data directory. A stored token is
//! trusted at startup without a verification round-trip; the first protected
//! call that comes back 401 demotes the gate and clears the file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Authentication state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

/// Two-state session gate holding the current credential token
///
/// Only the gate writes the token; everything else reads it through
/// [`SessionGate::token`], which fails fast with [`Error::Unauthenticated`]
/// when the session is anonymous.
#[derive(Debug, Clone, Default)]
pub struct SessionGate {
    token: Option<String>,
}

impl SessionGate {
    /// A fresh anonymous gate (cold start with no stored token)
    pub fn new() -> Self {
        Self { token: None }
    }

    /// Restore a gate from a previously stored token
    ///
    /// `Some(token)` goes straight to authenticated without verifying the
    /// token against the Store.
    pub fn with_token(token: Option<String>) -> Self {
        Self { token }
    }

    pub fn state(&self) -> SessionState {
        if self.token.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// The current token, or `Unauthenticated` if the session is anonymous
    ///
    /// Protected Store operations call this first so a doomed request is
    /// never issued.
    pub fn token(&self) -> Result<&str> {
        self.token.as_deref().ok_or(Error::Unauthenticated)
    }

    /// Record a successful login or registration
    pub fn authenticated(&mut self, token: String) {
        debug!("session authenticated");
        self.token = Some(token);
    }

    /// Explicit logout; returns to anonymous
    pub fn logout(&mut self) {
        debug!("session logged out");
        self.token = None;
    }

    /// The Store rejected our token (401-equivalent); clear it
    pub fn auth_failed(&mut self) {
        debug!("store rejected credentials, clearing session token");
        self.token = None;
    }
}

/// On-disk storage for the session token
///
/// A single opaque string in a plain file, by default
/// `<data dir>/billow/session`.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    /// Token file at the platform default location
    pub fn default_location() -> Result<Self> {
        let dir = dirs::data_local_dir()
            .ok_or_else(|| Error::Settings("could not determine data directory".to_string()))?;
        Ok(Self {
            path: dir.join("billow").join("session"),
        })
    }

    /// Token file at an explicit path (used by tests)
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token, if any
    pub fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(s) => {
                let token = s.trim().to_string();
                Ok(if token.is_empty() { None } else { Some(token) })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist a token, creating parent directories as needed
    pub fn store(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        Ok(())
    }

    /// Remove the stored token; missing file is fine
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cold_start_is_anonymous() {
        let gate = SessionGate::new();
        assert_eq!(gate.state(), SessionState::Anonymous);
        assert!(matches!(gate.token(), Err(Error::Unauthenticated)));
    }

    #[test]
    fn stored_token_is_trusted_optimistically() {
        let gate = SessionGate::with_token(Some("tok-123".to_string()));
        assert_eq!(gate.state(), SessionState::Authenticated);
        assert_eq!(gate.token().unwrap(), "tok-123");
    }

    #[test]
    fn login_then_logout_round_trip() {
        let mut gate = SessionGate::new();
        gate.authenticated("tok-abc".to_string());
        assert!(gate.is_authenticated());
        gate.logout();
        assert_eq!(gate.state(), SessionState::Anonymous);
    }

    #[test]
    fn auth_failure_clears_token() {
        let mut gate = SessionGate::with_token(Some("stale".to_string()));
        gate.auth_failed();
        assert_eq!(gate.state(), SessionState::Anonymous);
        assert!(gate.token().is_err());
    }

    #[test]
    fn token_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = TokenFile::at(dir.path().join("nested").join("session"));

        assert_eq!(file.load().unwrap(), None);
        file.store("tok-xyz").unwrap();
        assert_eq!(file.load().unwrap(), Some("tok-xyz".to_string()));
        file.clear().unwrap();
        assert_eq!(file.load().unwrap(), None);
        // Clearing twice is not an error
        file.clear().unwrap();
    }
}
