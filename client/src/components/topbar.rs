//! Page title with the signed-in user's name, company and role.

use leptos::prelude::*;

use crate::state::auth::AuthSnapshot;

#[component]
pub fn Topbar(title: &'static str) -> impl IntoView {
    let snapshot = expect_context::<RwSignal<AuthSnapshot>>();
    let profile = move || snapshot.with(AuthSnapshot::profile);

    view! {
        <header class="topbar">
            <h1 class="topbar__title">{title}</h1>
            {move || {
                profile()
                    .map(|p| {
                        view! {
                            <div class="topbar__profile">
                                <span class="topbar__name">{p.name}</span>
                                <span class="topbar__company">{p.company}</span>
                                <span class="topbar__role">{p.role}</span>
                            </div>
                        }
                    })
            }}
        </header>
    }
}
