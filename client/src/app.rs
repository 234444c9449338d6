//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    NavigateOptions, StaticSegment,
    components::{Redirect, Route, Router, Routes},
    hooks::use_navigate,
};
use session::{NavigationReason, routes};

use crate::pages::admin::{
    charts::ChartsPage, dashboard::AdminDashboardPage, register_company::RegisterCompanyPage,
    reports::ReportsPage, settings::AdminSettingsPage, users::AdminUsersPage,
};
use crate::pages::cliente::{
    dashboard::ClientDashboardPage, lockers::LockersPage, monitoreo::MonitoreoPage,
    register_user::RegisterUserPage, settings::ClientSettingsPage, suscripciones::SuscripcionesPage,
};
use crate::pages::login::LoginPage;
use crate::state::auth::AuthHandle;
use crate::state::session::SessionServices;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="es">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the session services once, loads the stored token after
/// hydration, and declares both role trees.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let services = SessionServices::provide();
    let auth = services.auth.clone();
    // Effects only run in the browser, so SSR keeps the mirror in `loading`.
    Effect::new(move || auth.initialize());

    view! {
        <Stylesheet id="leptos" href="/pkg/bodegix.css"/>
        <Title text="Bodegix"/>

        <Router>
            <NavigationRelay/>
            <Routes fallback=|| view! { <Redirect path=routes::LOGIN/> }>
                <Route path=StaticSegment("") view=|| view! { <Redirect path=routes::LOGIN/> }/>
                <Route path=StaticSegment("login") view=LoginPage/>

                <Route path=(StaticSegment("admin"), StaticSegment("dashboard")) view=AdminDashboardPage/>
                <Route path=(StaticSegment("admin"), StaticSegment("users")) view=AdminUsersPage/>
                <Route path=(StaticSegment("admin"), StaticSegment("reports")) view=ReportsPage/>
                <Route path=(StaticSegment("admin"), StaticSegment("register-company")) view=RegisterCompanyPage/>
                <Route path=(StaticSegment("admin"), StaticSegment("charts")) view=ChartsPage/>
                <Route path=(StaticSegment("admin"), StaticSegment("settings")) view=AdminSettingsPage/>

                <Route path=(StaticSegment("cliente"), StaticSegment("dashboard")) view=ClientDashboardPage/>
                <Route path=(StaticSegment("cliente"), StaticSegment("monitoreo")) view=MonitoreoPage/>
                <Route path=(StaticSegment("cliente"), StaticSegment("lockers")) view=LockersPage/>
                <Route path=(StaticSegment("cliente"), StaticSegment("suscripciones")) view=SuscripcionesPage/>
                <Route path=(StaticSegment("cliente"), StaticSegment("register-user")) view=RegisterUserPage/>
                <Route path=(StaticSegment("cliente"), StaticSegment("settings")) view=ClientSettingsPage/>
            </Routes>
        </Router>
    }
}

/// Applies forced navigations queued by the gateway.
///
/// Must sit inside `<Router>` so `use_navigate` has a router context.
#[component]
fn NavigationRelay() -> impl IntoView {
    let pending = expect_context::<crate::net::browser::PendingNavigation>();
    let auth = expect_context::<AuthHandle>();
    let navigate = use_navigate();

    Effect::new(move || {
        let Some(command) = pending.get() else {
            return;
        };
        pending.set(None);
        if command.reason == NavigationReason::SessionExpired {
            // The gateway already cleared the store; resync the mirror.
            auth.initialize();
        }
        tracing::info!(target = command.target, reason = ?command.reason, "forced navigation");
        navigate(command.target, NavigateOptions { replace: command.replace, ..NavigateOptions::default() });
    });
}
