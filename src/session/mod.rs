//! Session guard: the bearer token and username that gate the console.

pub mod store;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use crate::error::ConsoleError;

pub use store::{SessionStore, StoredSession};

/// Holds the login state and mirrors it to durable storage.
///
/// Shared as `Arc<Session>` between the API client and controllers; gateways
/// read the token at call time, so a login or logout is seen by the next
/// request.
#[derive(Debug)]
pub struct Session {
    store: Option<SessionStore>,
    state: RwLock<StoredSession>,
}

impl Session {
    /// Opens the session persisted in `store`; a missing file means logged out.
    pub fn open(store: SessionStore) -> Result<Self, ConsoleError> {
        let state = store.load()?;
        debug!(path = %store.path().display(), logged_in = state.token.is_some(), "session opened");
        Ok(Self {
            store: Some(store),
            state: RwLock::new(state),
        })
    }

    /// A session that is never written anywhere.
    pub fn in_memory() -> Self {
        Self {
            store: None,
            state: RwLock::new(StoredSession::default()),
        }
    }

    /// Records a successful login and persists it.
    pub fn store(&self, token: impl Into<String>, username: impl Into<String>) -> Result<(), ConsoleError> {
        let stored = StoredSession {
            token: Some(token.into()),
            username: Some(username.into()),
        };

        if let Some(store) = &self.store {
            store.save(&stored)?;
        }
        info!(username = stored.username.as_deref().unwrap_or_default(), "logged in");
        *self.write() = stored;
        Ok(())
    }

    /// Clears both entries.
    pub fn logout(&self) -> Result<(), ConsoleError> {
        if let Some(store) = &self.store {
            store.clear()?;
        }
        *self.write() = StoredSession::default();
        info!("logged out");
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn username(&self) -> Option<String> {
        self.read().username.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.read().token.as_deref().is_some_and(|token| !token.is_empty())
    }

    fn read(&self) -> RwLockReadGuard<'_, StoredSession> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoredSession> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
