//! Render-or-redirect decision for protected views.
//!
//! A pure function of `(identity, allowed roles)`. The caller performs the
//! navigation; this module only decides.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::role::AllowedRoles;
use crate::routes;
use crate::token::Identity;

/// Outcome of a guard check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(&'static str),
}

impl GuardDecision {
    #[must_use]
    pub fn is_render(self) -> bool {
        matches!(self, Self::Render)
    }
}

/// Decide whether `identity` may view a route declaring `allowed`.
///
/// 1. No identity: redirect to the login view.
/// 2. Neither the caller's role name nor role id is in `allowed`: redirect.
/// 3. Otherwise render.
#[must_use]
pub fn check(identity: Option<&Identity>, allowed: &AllowedRoles) -> GuardDecision {
    let Some(identity) = identity else {
        tracing::debug!("unauthenticated access to protected view");
        return GuardDecision::Redirect(routes::LOGIN);
    };

    if allowed.permits(identity.role_name.as_deref(), identity.role_id) {
        GuardDecision::Render
    } else {
        tracing::warn!(
            role_name = identity.role_name.as_deref().unwrap_or("-"),
            role_id = identity.role_id.unwrap_or_default(),
            "role not authorized for view"
        );
        GuardDecision::Redirect(routes::LOGIN)
    }
}
