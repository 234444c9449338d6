//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected view applies the same guard: once auth has loaded, a
//! redirect decision replaces the current history entry.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use session::GuardDecision;

use crate::state::auth::AuthSnapshot;

/// Redirect away from `path` whenever the guard stops allowing it.
pub fn install_route_guard<F>(snapshot: RwSignal<AuthSnapshot>, path: &'static str, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(GuardDecision::Redirect(target)) = snapshot.get().decide(path) {
            tracing::debug!(path, target, "route guard redirect");
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
