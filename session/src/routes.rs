//! Navigation surface: public entry, role-gated route trees, sidebar menus.
//!
//! SYSTEM CONTEXT
//! ==============
//! The Leptos router mounts these paths and the guard resolves them; keeping
//! the table here lets the whole navigation policy be tested without a
//! browser.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::guard::{self, GuardDecision};
use crate::role::{AllowedRoles, Role};
use crate::token::Identity;

/// Public entry view.
pub const LOGIN: &str = "/login";
/// Subscription management, target of 402 redirects.
pub const SUBSCRIPTIONS: &str = "/cliente/suscripciones";
pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";
pub const CLIENT_DASHBOARD: &str = "/cliente/dashboard";

/// Role-gated route tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Area {
    /// `/admin/*`, SuperAdmin only.
    Admin,
    /// `/cliente/*`, company administrators.
    Client,
}

impl Area {
    #[must_use]
    pub fn allowed(self) -> AllowedRoles {
        match self {
            Self::Admin => AllowedRoles::superadmin(),
            Self::Client => AllowedRoles::client(),
        }
    }
}

/// A protected view and its sidebar label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProtectedRoute {
    pub path: &'static str,
    pub label: &'static str,
    pub area: Area,
}

const fn route(path: &'static str, label: &'static str, area: Area) -> ProtectedRoute {
    ProtectedRoute { path, label, area }
}

/// Every protected view, in sidebar order per area.
pub const PROTECTED: &[ProtectedRoute] = &[
    route(ADMIN_DASHBOARD, "Dashboard", Area::Admin),
    route("/admin/users", "Usuarios", Area::Admin),
    route("/admin/reports", "Reportes", Area::Admin),
    route("/admin/register-company", "Registrar Empresa", Area::Admin),
    route("/admin/charts", "Empresa Status", Area::Admin),
    route("/admin/settings", "Configuración", Area::Admin),
    route(CLIENT_DASHBOARD, "Dashboard", Area::Client),
    route("/cliente/monitoreo", "Monitoreo", Area::Client),
    route("/cliente/lockers", "Lockers", Area::Client),
    route(SUBSCRIPTIONS, "Suscripciones", Area::Client),
    route("/cliente/register-user", "Registrar Empleado", Area::Client),
    route("/cliente/settings", "Configuración", Area::Client),
];

/// Look up a protected route by exact path (trailing slash ignored).
#[must_use]
pub fn find(path: &str) -> Option<&'static ProtectedRoute> {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    PROTECTED.iter().find(|r| r.path == path)
}

/// Resolve a requested path for `identity`.
///
/// The login view always renders; unknown paths fall through to the login
/// view like the router's catch-all.
#[must_use]
pub fn resolve(path: &str, identity: Option<&Identity>) -> GuardDecision {
    if path.trim_end_matches('/') == LOGIN {
        return GuardDecision::Render;
    }
    match find(path) {
        Some(route) => guard::check(identity, &route.area.allowed()),
        None => GuardDecision::Redirect(LOGIN),
    }
}

/// Sidebar entries visible to `identity`.
#[must_use]
pub fn menu_for(identity: &Identity) -> Vec<&'static ProtectedRoute> {
    PROTECTED
        .iter()
        .filter(|r| r.area.allowed().permits(identity.role_name.as_deref(), identity.role_id))
        .collect()
}

/// Dashboard a role lands on after signing in, if it may sign in at all.
#[must_use]
pub fn landing_for(role: Role) -> Option<&'static str> {
    match role {
        Role::SuperAdmin => Some(ADMIN_DASHBOARD),
        Role::CompanyAdmin => Some(CLIENT_DASHBOARD),
        Role::Employee => None,
    }
}
