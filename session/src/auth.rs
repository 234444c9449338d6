//! In-memory owner of the current auth state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Initialized once from the session store at startup, then mutated only by
//! `login` and `logout`. Route guards read [`AuthManager::snapshot`].
//!
//! CONCURRENCY
//! ===========
//! The state is swapped whole under a lock and subscribers run before the
//! mutating call returns, so a guard evaluated after `login` completes never
//! sees the previous identity.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::context::SessionContext;
use crate::routes;
use crate::token::{self, Identity, MalformedTokenError};

/// Errors from explicit auth operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The token handed to `login` could not be decoded.
    #[error("malformed session token: {0}")]
    Malformed(#[from] MalformedTokenError),
    /// The identity has no role that may use this front end.
    #[error("role not authorized to sign in")]
    UnauthorizedRole,
}

/// Current decoded identity, `None` when logged out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub identity: Option<Identity>,
}

impl AuthState {
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

/// Top-bar display data with the UI's fallbacks applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub company: String,
    pub role: String,
}

impl Profile {
    #[must_use]
    pub fn from_identity(identity: &Identity) -> Self {
        Self {
            name: identity.display_name.clone().unwrap_or_else(|| "Usuario".to_owned()),
            company: identity.company_name.clone().unwrap_or_else(|| "Empresa".to_owned()),
            role: identity.role_name.clone().unwrap_or_else(|| "Cliente".to_owned()),
        }
    }
}

type Listener = Box<dyn Fn(&AuthState) + Send + Sync>;

/// Single owner of [`AuthState`] for one session context.
#[derive(Clone)]
pub struct AuthManager {
    context: SessionContext,
    state: Arc<RwLock<AuthState>>,
    listeners: Arc<Mutex<Vec<Listener>>>,
}

impl AuthManager {
    /// Create a manager in the logged-out state. Call [`Self::initialize`]
    /// before the first guard check.
    #[must_use]
    pub fn new(context: SessionContext) -> Self {
        Self { context, state: Arc::new(RwLock::new(AuthState::default())), listeners: Arc::new(Mutex::new(Vec::new())) }
    }

    #[must_use]
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Load the identity from the stored token.
    ///
    /// Never fails: an undecodable token is removed and the state stays
    /// logged out.
    pub fn initialize(&self) {
        let identity = match self.context.store().read() {
            None => None,
            Some(raw) => match token::decode(&raw) {
                Ok(identity) => {
                    tracing::info!(subject = %identity.subject_id, "session restored from storage");
                    Some(identity)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stored session token is malformed; discarding");
                    self.context.store().clear();
                    None
                }
            },
        };
        self.replace(AuthState { identity });
    }

    /// Persist `token` and adopt its identity.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Malformed`] if the token cannot be decoded. The
    /// store is cleared again in that case so no half-logged-in state remains.
    pub fn login(&self, token: &str) -> Result<Identity, AuthError> {
        self.context.store().save(token);
        let identity = match token::decode(token) {
            Ok(identity) => identity,
            Err(e) => {
                self.context.store().clear();
                self.replace(AuthState::default());
                return Err(e.into());
            }
        };
        self.context.reset_notices();
        tracing::info!(subject = %identity.subject_id, role = ?identity.role(), "user authenticated");
        self.replace(AuthState { identity: Some(identity.clone()) });
        Ok(identity)
    }

    /// Forget the token and the identity.
    pub fn logout(&self) {
        self.context.store().clear();
        self.replace(AuthState::default());
        tracing::info!("user logged out");
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.snapshot().identity
    }

    /// Register a callback run synchronously after every state change.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&AuthState) + Send + Sync + 'static,
    {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(listener));
    }

    /// Where the current identity lands after signing in.
    ///
    /// # Errors
    ///
    /// [`AuthError::UnauthorizedRole`] when logged out or when the role has
    /// no dashboard in this front end (employees).
    pub fn landing_route(&self) -> Result<&'static str, AuthError> {
        self.identity()
            .and_then(|identity| identity.role())
            .and_then(routes::landing_for)
            .ok_or(AuthError::UnauthorizedRole)
    }

    /// Top-bar profile for the current identity.
    #[must_use]
    pub fn profile(&self) -> Option<Profile> {
        self.identity().as_ref().map(Profile::from_identity)
    }

    fn replace(&self, next: AuthState) {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            *state = next.clone();
        }
        let listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        for listener in listeners.iter() {
            listener(&next);
        }
    }
}
