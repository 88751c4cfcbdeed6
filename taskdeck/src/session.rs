//! Persisted session credentials.
//!
//! The session is two files under the session directory: `access_token`
//! holding the bearer token and `user_data` holding a JSON snapshot of
//! the signed-in user. Logout and 401 handling remove exactly those two
//! files and nothing else.

use std::path::{Path, PathBuf};

use taskdeck_api::user::User;

/// File name for the bearer token.
pub const ACCESS_TOKEN_FILE: &str = "access_token";

/// File name for the user snapshot.
pub const USER_DATA_FILE: &str = "user_data";

/// Errors that can occur while persisting session state.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to read or write a session file.
    #[error("failed to access session file {path}: {source}")]
    Io {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to serialize the user snapshot.
    #[error("failed to encode session data: {0}")]
    Encode(#[from] serde_json::Error),

    /// Could not determine the user's data directory.
    #[error("could not determine data directory (no HOME or XDG_DATA_HOME)")]
    NoDataDir,
}

/// File-backed session storage.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Opens the session store, creating its directory if needed.
    ///
    /// Without an override the platform data directory is used
    /// (`~/.local/share/taskdeck` on Linux).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if no data directory can be determined or
    /// the directory cannot be created.
    pub fn open(dir_override: Option<PathBuf>) -> Result<Self, SessionError> {
        let dir = match dir_override {
            Some(dir) => dir,
            None => dirs::data_dir()
                .ok_or(SessionError::NoDataDir)?
                .join("taskdeck"),
        };
        std::fs::create_dir_all(&dir).map_err(|e| SessionError::Io {
            path: dir.clone(),
            source: e,
        })?;
        Ok(Self { dir })
    }

    /// Persists the bearer token and user snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if either file cannot be written.
    pub fn store(&self, token: &str, user: &User) -> Result<(), SessionError> {
        write_file(&self.dir.join(ACCESS_TOKEN_FILE), token)?;
        let snapshot = serde_json::to_string(user)?;
        write_file(&self.dir.join(USER_DATA_FILE), &snapshot)
    }

    /// Returns the stored bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        let token = std::fs::read_to_string(self.dir.join(ACCESS_TOKEN_FILE)).ok()?;
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    /// Returns the stored user snapshot, if present and well-formed.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        let snapshot = std::fs::read_to_string(self.dir.join(USER_DATA_FILE)).ok()?;
        serde_json::from_str(&snapshot).ok()
    }

    /// Whether a token is currently stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Removes the token and user snapshot. Runs to completion even when
    /// one of the files is already gone; other removal failures are
    /// logged and otherwise ignored so logout always leaves a signed-out
    /// local state.
    pub fn clear(&self) {
        for name in [ACCESS_TOKEN_FILE, USER_DATA_FILE] {
            let path = self.dir.join(name);
            if let Err(e) = std::fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "failed to remove session file");
                }
            }
        }
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), SessionError> {
    std::fs::write(path, contents).map_err(|e| SessionError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
