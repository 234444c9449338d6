//! Role-specific navigation menu with the logout action.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use session::routes;

use crate::net::api::Backend;
use crate::state::auth::{AuthHandle, AuthSnapshot};

#[component]
pub fn Sidebar(current: &'static str) -> impl IntoView {
    let snapshot = expect_context::<RwSignal<AuthSnapshot>>();
    let auth = expect_context::<AuthHandle>();
    let backend = expect_context::<Backend>();
    let navigate = use_navigate();

    let items = move || {
        snapshot.with(|s| s.identity.as_ref().map(routes::menu_for).unwrap_or_default())
    };

    let on_logout = move |_| {
        let auth = auth.clone();
        let backend = backend.clone();
        let navigate = navigate.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            // Tell the backend first while the token is still attached.
            if let Ok(client) = backend.client() {
                crate::net::api::logout(client).await;
            }
            auth.sign_out();
            navigate(routes::LOGIN, leptos_router::NavigateOptions::default());
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (backend, navigate);
            auth.sign_out();
        }
    };

    view! {
        <nav class="sidebar">
            <div class="sidebar__brand">"Bodegix"</div>
            <ul class="sidebar__menu">
                {move || {
                    items()
                        .into_iter()
                        .map(|item| {
                            let class = if item.path == current {
                                "sidebar__item sidebar__item--active"
                            } else {
                                "sidebar__item"
                            };
                            view! {
                                <li class=class>
                                    <a href=item.path>{item.label}</a>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </ul>
            <button class="sidebar__logout" on:click=on_logout>
                "Cerrar Sesión"
            </button>
        </nav>
    }
}
