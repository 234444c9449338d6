//! Browser bindings for the session seams.
//!
//! SYSTEM CONTEXT
//! ==============
//! The gateway never touches the router directly. [`SignalNavigator`] parks
//! each [`NavigationCommand`] in a signal; the relay mounted inside the
//! router applies it (or drops it if a newer command replaced it first).
//! [`AlertNotifier`] shows notices with `window.alert`.

use leptos::prelude::*;
use session::{ApiRoot, ConfigError, NavigationCommand, Navigator, Notice, Notifier};

/// Pending forced navigation, consumed by the router relay.
pub type PendingNavigation = RwSignal<Option<NavigationCommand>>;

#[derive(Clone, Copy, Debug)]
pub struct SignalNavigator {
    pending: PendingNavigation,
}

impl SignalNavigator {
    #[must_use]
    pub fn new(pending: PendingNavigation) -> Self {
        Self { pending }
    }
}

impl Navigator for SignalNavigator {
    fn navigate(&self, command: NavigationCommand) {
        tracing::debug!(target = command.target, reason = ?command.reason, "queueing navigation");
        self.pending.set(Some(command));
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&self, notice: &Notice) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(notice.text());
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            tracing::warn!(notice = notice.text(), "session notice outside browser");
        }
    }
}

/// Origin of the current page, `None` outside a browser.
#[must_use]
pub fn page_origin() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window().and_then(|w| w.location().origin().ok())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Resolve the backend root from the build-time setting and the page origin.
///
/// # Errors
///
/// See [`ApiRoot::resolve`].
pub fn api_root() -> Result<ApiRoot, ConfigError> {
    ApiRoot::resolve(option_env!("BODEGIX_API_URL"), page_origin().as_deref())
}
