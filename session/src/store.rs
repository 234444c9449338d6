//! Durable storage for the single session token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store is the sole source of truth for "is a user logged in". Only the
//! auth manager and the API gateway response phase write to it.
//!
//! ERROR HANDLING
//! ==============
//! Storage failures never propagate: an unreadable store reads as "no token"
//! and failed writes are logged and dropped.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

/// Well-known storage key for the session token.
pub const TOKEN_KEY: &str = "token";

/// Persistence for one bearer token. No local expiry is enforced.
pub trait SessionStore: Send + Sync {
    fn save(&self, token: &str);
    fn read(&self) -> Option<String>;
    fn clear(&self);
}

/// In-process store for tests and server-side rendering.
#[derive(Debug, Default)]
pub struct MemoryStore {
    token: Mutex<Option<String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self { token: Mutex::new(Some(token.to_owned())) }
    }
}

impl SessionStore for MemoryStore {
    fn save(&self, token: &str) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
    }

    fn read(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Token kept in a single file, for native command-line use.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SessionStore for FileStore {
    fn save(&self, token: &str) {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(error = %e, path = %parent.display(), "token directory not writable");
                return;
            }
        }
        if let Err(e) = std::fs::write(&self.path, token) {
            tracing::warn!(error = %e, path = %self.path.display(), "failed to persist session token");
        }
    }

    fn read(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        (!token.is_empty()).then(|| token.to_owned())
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(error = %e, path = %self.path.display(), "failed to remove session token"),
        }
    }
}

/// Browser `localStorage` under [`TOKEN_KEY`].
///
/// Looks the storage up on every call; a missing window or disabled storage
/// behaves as an empty store.
#[cfg(feature = "web")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

#[cfg(feature = "web")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "web")]
impl SessionStore for LocalStorageStore {
    fn save(&self, token: &str) {
        let Some(storage) = Self::storage() else {
            tracing::warn!("localStorage unavailable; session token not persisted");
            return;
        };
        if storage.set_item(TOKEN_KEY, token).is_err() {
            tracing::warn!("localStorage rejected session token write");
        }
    }

    fn read(&self) -> Option<String> {
        let token = Self::storage()?.get_item(TOKEN_KEY).ok().flatten()?;
        (!token.is_empty()).then_some(token)
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            if storage.remove_item(TOKEN_KEY).is_err() {
                tracing::warn!("localStorage rejected session token removal");
            }
        }
    }
}
