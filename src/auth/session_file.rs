//! Signed-in session persisted between runs.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::auth::IdentityError;
use crate::config::SecureString;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub username: String,
    pub access_token: SecureString,
    pub id_token: SecureString,
    #[serde(default)]
    pub refresh_token: Option<SecureString>,
}

#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `Ok(None)` when no session has been saved.
    pub fn load(&self) -> Result<Option<StoredSession>, IdentityError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.store_error(source)),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn save(&self, session: &StoredSession) -> Result<(), IdentityError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| self.store_error(source))?;
        }
        let content = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, content).map_err(|source| self.store_error(source))
    }

    pub fn clear(&self) -> Result<(), IdentityError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.store_error(source)),
        }
    }

    fn store_error(&self, source: io::Error) -> IdentityError {
        IdentityError::SessionStore {
            path: self.path.clone(),
            source,
        }
    }
}
