//! Authentication session held by the presentation layer
//!
//! The CLI exits after every command, so it keeps the session in
//! `session.json` inside the data directory. Signing out removes the file.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use truckreg_types::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub is_authenticated: bool,
    pub current_user: Option<String>,
}

impl Session {
    /// Mark `username` as the authenticated user
    pub fn sign_in(&mut self, username: &str) {
        self.is_authenticated = true;
        self.current_user = Some(username.to_string());
    }

    /// Clear the session, returning the user that was signed in
    pub fn sign_out(&mut self) -> Option<String> {
        self.is_authenticated = false;
        self.current_user.take()
    }

    /// The signed-in username, if any
    pub fn current_user(&self) -> Option<&str> {
        if self.is_authenticated {
            self.current_user.as_deref()
        } else {
            None
        }
    }

    /// Load a persisted session; a missing or unreadable file means signed out
    pub fn load(path: &Path) -> Session {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Session::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Session file unreadable, signing out");
                return Session::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Session file corrupt, signing out");
            Session::default()
        })
    }

    /// Persist the session; a signed-out session removes the file
    pub fn save(&self, path: &Path) -> Result<()> {
        if self.current_user().is_none() {
            return Self::clear(path);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Remove a persisted session
    pub fn clear(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
