//! Login page: email + password against the backend.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::net::api::Backend;
use crate::state::auth::AuthHandle;

/// Trim both fields and require each.
///
/// # Errors
///
/// A user-facing message when either field is blank.
pub fn validate_credentials(correo: &str, contrasena: &str) -> Result<(String, String), &'static str> {
    let correo = correo.trim();
    if correo.is_empty() || contrasena.is_empty() {
        return Err("Ingresa tu correo y contraseña.");
    }
    Ok((correo.to_owned(), contrasena.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<AuthHandle>();
    let backend = expect_context::<Backend>();
    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();

    let correo = RwSignal::new(String::new());
    let contrasena = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let reveal = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (correo_value, contrasena_value) = match validate_credentials(&correo.get(), &contrasena.get()) {
            Ok(pair) => pair,
            Err(msg) => {
                error.set(msg.to_owned());
                return;
            }
        };
        error.set(String::new());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let auth = auth.clone();
            let backend = backend.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let token = match backend.client() {
                    Ok(client) => crate::net::api::login(client, &correo_value, &contrasena_value).await,
                    Err(err) => Err(err),
                };
                match token {
                    Ok(token) => match auth.sign_in(&token) {
                        Ok(landing) => navigate(landing, leptos_router::NavigateOptions::default()),
                        Err(err) => error.set(crate::state::auth::sign_in_error_message(&err).to_owned()),
                    },
                    Err(err) => {
                        tracing::warn!(error = %err, "login failed");
                        error.set(err.user_message());
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (correo_value, contrasena_value, &auth, &backend);
            busy.set(false);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Bodegix"</h1>
                <p class="login-card__subtitle">"Iniciar Sesión"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="Correo electrónico"
                        prop:value=move || correo.get()
                        on:input=move |ev| correo.set(event_target_value(&ev))
                    />
                    <div class="login-input-row">
                        <input
                            class="login-input"
                            type=move || if reveal.get() { "text" } else { "password" }
                            placeholder="Contraseña"
                            prop:value=move || contrasena.get()
                            on:input=move |ev| contrasena.set(event_target_value(&ev))
                        />
                        <button class="login-reveal" type="button" on:click=move |_| reveal.update(|r| *r = !*r)>
                            {move || if reveal.get() { "Ocultar" } else { "Mostrar" }}
                        </button>
                    </div>
                    <Show when=move || !error.get().is_empty()>
                        <p class="login-message login-message--error">{move || error.get()}</p>
                    </Show>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Iniciar Sesión"
                    </button>
                </form>
            </div>
        </div>
    }
}
