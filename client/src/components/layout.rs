//! Guarded page frame.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use session::GuardDecision;

use super::sidebar::Sidebar;
use super::topbar::Topbar;
use crate::state::auth::AuthSnapshot;
use crate::util::auth::install_route_guard;

/// Renders `children` inside the app frame only while the guard allows
/// `path`; otherwise shows a placeholder until the redirect lands.
#[component]
pub fn ProtectedLayout(path: &'static str, title: &'static str, children: ChildrenFn) -> impl IntoView {
    let snapshot = expect_context::<RwSignal<AuthSnapshot>>();
    install_route_guard(snapshot, path, use_navigate());

    let allowed = move || snapshot.with(|s| s.decide(path).is_some_and(GuardDecision::is_render));

    view! {
        <Show when=allowed fallback=|| view! { <div class="page-loading">"Cargando..."</div> }>
            <div class="app-layout">
                <Sidebar current=path/>
                <main class="app-layout__main">
                    <Topbar title=title/>
                    <section class="app-layout__content">{children()}</section>
                </main>
            </div>
        </Show>
    }
}
