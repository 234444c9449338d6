//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`AuthHandle`] pairs the `session` auth manager with a signal mirror so
//! route guards and user-aware components re-render on login and logout.
//! The mirror starts in `loading` and only settles once the manager has
//! initialized from `localStorage` after hydration, so the server render
//! never redirects a user whose token it cannot see.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use session::{AuthError, AuthManager, AuthState, GuardDecision, Identity, Profile, routes};

/// Reactive view of the auth manager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub identity: Option<Identity>,
    pub loading: bool,
}

impl Default for AuthSnapshot {
    fn default() -> Self {
        Self { identity: None, loading: true }
    }
}

impl AuthSnapshot {
    #[must_use]
    pub fn settled(state: &AuthState) -> Self {
        Self { identity: state.identity.clone(), loading: false }
    }

    /// Guard decision for `path`, or `None` while still loading.
    #[must_use]
    pub fn decide(&self, path: &str) -> Option<GuardDecision> {
        (!self.loading).then(|| routes::resolve(path, self.identity.as_ref()))
    }

    #[must_use]
    pub fn profile(&self) -> Option<Profile> {
        self.identity.as_ref().map(Profile::from_identity)
    }

    #[must_use]
    pub fn company_id(&self) -> Option<i64> {
        self.identity.as_ref().and_then(|i| i.company_id)
    }
}

/// Auth manager plus its signal mirror, provided through context.
#[derive(Clone)]
pub struct AuthHandle {
    manager: AuthManager,
    snapshot: RwSignal<AuthSnapshot>,
}

impl AuthHandle {
    /// Wire `snapshot` to follow every mutation of `manager`.
    #[must_use]
    pub fn new(manager: AuthManager, snapshot: RwSignal<AuthSnapshot>) -> Self {
        manager.subscribe(move |state| snapshot.set(AuthSnapshot::settled(state)));
        Self { manager, snapshot }
    }

    #[must_use]
    pub fn snapshot(&self) -> RwSignal<AuthSnapshot> {
        self.snapshot
    }

    /// Load the stored session. Runs after hydration.
    pub fn initialize(&self) {
        self.manager.initialize();
    }

    /// Establish a session from a freshly issued token and return where the
    /// user should land.
    ///
    /// A structurally valid token whose role may not sign in is kept out:
    /// the session is cleared again before the error is returned.
    ///
    /// # Errors
    ///
    /// [`AuthError::Malformed`] or [`AuthError::UnauthorizedRole`].
    pub fn sign_in(&self, token: &str) -> Result<&'static str, AuthError> {
        self.manager.login(token)?;
        self.manager.landing_route().inspect_err(|_| {
            tracing::warn!("signed-in role has no dashboard; discarding session");
            self.manager.logout();
        })
    }

    pub fn sign_out(&self) {
        self.manager.logout();
    }
}

/// User-facing text for a failed sign-in.
#[must_use]
pub fn sign_in_error_message(err: &AuthError) -> &'static str {
    match err {
        AuthError::UnauthorizedRole => "Rol no autorizado para ingresar.",
        AuthError::Malformed(_) => "Token de sesión inválido.",
    }
}
