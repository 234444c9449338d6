//! Construction of the per-app session services.
//!
//! One [`SessionContext`] is built per mounted app and shared by the auth
//! handle and the backend gateway, so the 401/402 notice flags and the
//! token store are the same instance for both.

use std::sync::Arc;

use leptos::prelude::*;
use session::{AuthManager, SessionContext, SessionStore};

use super::auth::{AuthHandle, AuthSnapshot};
use crate::net::api::Backend;
use crate::net::browser::{self, AlertNotifier, PendingNavigation, SignalNavigator};

/// Everything the page tree needs from the session layer.
#[derive(Clone)]
pub struct SessionServices {
    pub auth: AuthHandle,
    pub backend: Backend,
    pub pending: PendingNavigation,
}

impl SessionServices {
    /// Build the services and provide each through context.
    pub fn provide() -> Self {
        let pending: PendingNavigation = RwSignal::new(None);
        let context = SessionContext::new(token_store(), Arc::new(SignalNavigator::new(pending)), Arc::new(AlertNotifier));

        let root = browser::api_root();
        if let Err(err) = &root {
            tracing::error!(error = %err, "backend root refused");
        }

        let services = Self {
            auth: AuthHandle::new(AuthManager::new(context.clone()), RwSignal::new(AuthSnapshot::default())),
            backend: Backend::new(root, context),
            pending,
        };
        provide_context(services.auth.clone());
        provide_context(services.auth.snapshot());
        provide_context(services.backend.clone());
        provide_context(pending);
        services
    }
}

fn token_store() -> Arc<dyn SessionStore> {
    #[cfg(feature = "hydrate")]
    {
        Arc::new(session::store::LocalStorageStore)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Arc::new(session::MemoryStore::new())
    }
}
