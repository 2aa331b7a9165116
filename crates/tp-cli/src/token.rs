//! Login token persistence.
//!
//! The token lives in a plain text file; only its first line is read.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Reads and writes the login token at a fixed path.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the stored token.
    ///
    /// Returns `None` if the file doesn't exist or holds no token.
    pub fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.lines().next().unwrap_or_default().trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("failed to read {}", self.path.display()))
            }
        }
    }

    /// Writes the token, creating the parent directory if needed.
    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).context("failed to create token directory")?;
        }
        std::fs::write(&self.path, token)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "token saved");
        Ok(())
    }

    /// Forgets the token. Clearing a missing token is not an error.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("failed to remove {}", self.path.display()))
            }
        }
    }
}

/// Unwraps something that only exists once a token is stored.
pub fn logged_in<T>(value: Option<&T>) -> Result<&T> {
    value.context("not logged in, run `todopeer login`")
}
