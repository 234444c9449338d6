//! Constructed session context shared by the auth manager and the gateway.
//!
//! DESIGN
//! ======
//! Everything that would otherwise be an ambient global (the token store,
//! the "already notified" flags, navigation, and user notices) lives in one
//! cloneable [`SessionContext`] built at startup and injected where needed.
//! Tests build a fresh context per case, so flags never leak between runs.
//!
//! Navigation is issued as a [`NavigationCommand`] to a [`Navigator`]. The
//! routing layer decides how to apply it and may drop it (cancel) entirely.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::routes;
use crate::store::SessionStore;

const SESSION_EXPIRED_TEXT: &str = "Tu sesión expiró. Ingresa nuevamente.";
const SUBSCRIPTION_INACTIVE_TEXT: &str = "Tu suscripción no está activa. Actívala para administrar lockers.";

/// Why a forced navigation was issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationReason {
    SessionExpired,
    SubscriptionRequired,
}

/// Request for the routing layer to leave the current view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationCommand {
    pub target: &'static str,
    pub reason: NavigationReason,
    /// Replace the current history entry rather than pushing.
    pub replace: bool,
}

/// Routing layer seam.
pub trait Navigator: Send + Sync {
    fn navigate(&self, command: NavigationCommand);
}

/// One-time, user-visible notice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    SessionExpired,
    SubscriptionInactive { message: Option<String> },
}

impl Notice {
    /// Text shown to the user.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::SessionExpired => SESSION_EXPIRED_TEXT,
            Self::SubscriptionInactive { message } => message.as_deref().unwrap_or(SUBSCRIPTION_INACTIVE_TEXT),
        }
    }
}

/// Alert/modal seam.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Navigator/notifier that only logs. Used for SSR and headless callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOnly;

impl Navigator for LogOnly {
    fn navigate(&self, command: NavigationCommand) {
        tracing::info!(target = command.target, reason = ?command.reason, "navigation requested");
    }
}

impl Notifier for LogOnly {
    fn notify(&self, notice: &Notice) {
        tracing::warn!(notice = notice.text(), "session notice");
    }
}

/// Independent "already shown" flags for the 401 and 402 notices.
#[derive(Debug, Default)]
pub(crate) struct NoticeFlags {
    unauthorized: AtomicBool,
    payment_required: AtomicBool,
}

impl NoticeFlags {
    /// True exactly once per flag lifetime, even under concurrent callers.
    fn claim(flag: &AtomicBool) -> bool {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn reset(&self) {
        self.unauthorized.store(false, Ordering::Release);
        self.payment_required.store(false, Ordering::Release);
    }
}

struct ContextInner {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    flags: NoticeFlags,
}

/// Process-wide session context. Cheap to clone.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<ContextInner>,
}

impl SessionContext {
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>, notifier: Arc<dyn Notifier>) -> Self {
        Self { inner: Arc::new(ContextInner { store, navigator, notifier, flags: NoticeFlags::default() }) }
    }

    /// Context whose navigation and notices are only logged.
    #[must_use]
    pub fn headless(store: Arc<dyn SessionStore>) -> Self {
        Self::new(store, Arc::new(LogOnly), Arc::new(LogOnly))
    }

    /// Read-only view of the stored token.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner.store.read()
    }

    pub(crate) fn store(&self) -> &dyn SessionStore {
        self.inner.store.as_ref()
    }

    /// Re-arm both notices for a freshly established session.
    pub(crate) fn reset_notices(&self) {
        self.inner.flags.reset();
    }

    /// 401 handling: only the first caller notifies and redirects to the
    /// login view. Any token still in the store is cleared on every call, so
    /// one written by another tab after the first 401 does not survive.
    /// Returns whether this call notified.
    pub(crate) fn expire_session(&self) -> bool {
        let first = NoticeFlags::claim(&self.inner.flags.unauthorized);
        if first || self.inner.store.read().is_some() {
            self.inner.store.clear();
        }
        if !first {
            tracing::debug!("session already expired; suppressing duplicate notice");
            return false;
        }
        tracing::warn!("backend rejected session token; session cleared");
        self.inner.notifier.notify(&Notice::SessionExpired);
        self.inner.navigator.navigate(NavigationCommand {
            target: routes::LOGIN,
            reason: NavigationReason::SessionExpired,
            replace: true,
        });
        true
    }

    /// 402 handling: every call redirects to subscription management; only
    /// the first shows the notice. The token is kept. Returns whether this
    /// call showed the notice.
    pub(crate) fn require_subscription(&self, notice: Notice) -> bool {
        let first = NoticeFlags::claim(&self.inner.flags.payment_required);
        if first {
            tracing::warn!("backend reports inactive subscription");
            self.inner.notifier.notify(&notice);
        } else {
            tracing::debug!("subscription notice already shown");
        }
        self.inner.navigator.navigate(NavigationCommand {
            target: routes::SUBSCRIPTIONS,
            reason: NavigationReason::SubscriptionRequired,
            replace: false,
        });
        first
    }
}
