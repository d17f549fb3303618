use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::StorageConfig;
use crate::error::ConsoleError;

/// The two persisted entries; no expiry is recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: Option<String>,
    pub username: Option<String>,
}

/// `session.json` inside the console config directory
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

pub fn get_config_dir(storage: &StorageConfig) -> Result<PathBuf, ConsoleError> {
    let config_dir = match &storage.config_dir {
        Some(custom_dir) => custom_dir.clone(),
        None => {
            let home = std::env::var("HOME").map_err(|_| {
                ConsoleError::Io(io::Error::new(io::ErrorKind::NotFound, "HOME environment variable not set"))
            })?;
            PathBuf::from(home).join(".config").join("alamal")
        }
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join("session.json"))
    }

    pub fn from_config(storage: &StorageConfig) -> Result<Self, ConsoleError> {
        Ok(Self::in_dir(get_config_dir(storage)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<StoredSession, ConsoleError> {
        if !self.path.exists() {
            return Ok(StoredSession::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let stored: StoredSession = serde_json::from_str(&content)?;
        Ok(stored)
    }

    pub fn save(&self, stored: &StoredSession) -> Result<(), ConsoleError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(stored)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), ConsoleError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
