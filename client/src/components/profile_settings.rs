//! Account settings form for the signed-in user.

#[cfg(test)]
#[path = "profile_settings_test.rs"]
mod profile_settings_test;

use leptos::prelude::*;

use super::status::{ErrorNote, Loading};
use crate::net::api::{self, Backend};
use crate::net::types::UsuarioForm;
use crate::state::auth::AuthSnapshot;

/// Validate the settings inputs. A blank password leaves it unchanged.
///
/// # Errors
///
/// A user-facing message for the first invalid field.
pub fn settings_form(nombre: &str, correo: &str, contrasena: &str) -> Result<UsuarioForm, &'static str> {
    let nombre = nombre.trim();
    let correo = correo.trim();
    if nombre.is_empty() {
        return Err("El nombre es obligatorio.");
    }
    if !correo.contains('@') {
        return Err("Ingresa un correo válido.");
    }
    let contrasena = contrasena.trim();
    Ok(UsuarioForm {
        nombre: nombre.to_owned(),
        correo: correo.to_owned(),
        contrasena: (!contrasena.is_empty()).then(|| contrasena.to_owned()),
        rol_id: None,
        empresa_id: None,
    })
}

#[component]
pub fn ProfileSettings() -> impl IntoView {
    let snapshot = expect_context::<RwSignal<AuthSnapshot>>();
    let backend = expect_context::<Backend>();

    let user_id = move || snapshot.with(|s| s.identity.as_ref().map(|i| i.subject_id.clone()));
    let nombre = RwSignal::new(String::new());
    let correo = RwSignal::new(String::new());
    let contrasena = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());

    let loaded = LocalResource::new({
        let backend = backend.clone();
        move || {
            let backend = backend.clone();
            let id = user_id();
            async move {
                let id = id.unwrap_or_default();
                let usuario = api::fetch_usuario(backend.client()?, &id).await?;
                nombre.set(usuario.nombre.clone());
                correo.set(usuario.correo.clone());
                Ok::<_, session::ApiError>(usuario)
            }
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = match settings_form(&nombre.get(), &correo.get(), &contrasena.get()) {
            Ok(form) => form,
            Err(msg) => {
                message.set(msg.to_owned());
                return;
            }
        };
        let Some(id) = user_id() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        {
            let backend = backend.clone();
            leptos::task::spawn_local(async move {
                let result = match backend.client() {
                    Ok(client) => api::update_usuario(client, &id, &form).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(_) => {
                        contrasena.set(String::new());
                        message.set("Datos actualizados.".to_owned());
                    }
                    Err(err) => message.set(err.user_message()),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, form, &backend);
        }
    };

    view! {
        <Suspense fallback=|| view! { <Loading/> }>
            {move || {
                loaded
                    .get()
                    .map(|result| match result {
                        Err(error) => view! { <ErrorNote error=error/> }.into_any(),
                        Ok(_) => {
                            view! {
                                <form class="settings-form" on:submit=on_submit.clone()>
                                    <label>
                                        "Nombre"
                                        <input
                                            type="text"
                                            prop:value=move || nombre.get()
                                            on:input=move |ev| nombre.set(event_target_value(&ev))
                                        />
                                    </label>
                                    <label>
                                        "Correo"
                                        <input
                                            type="email"
                                            prop:value=move || correo.get()
                                            on:input=move |ev| correo.set(event_target_value(&ev))
                                        />
                                    </label>
                                    <label>
                                        "Nueva contraseña"
                                        <input
                                            type="password"
                                            prop:value=move || contrasena.get()
                                            on:input=move |ev| contrasena.set(event_target_value(&ev))
                                        />
                                    </label>
                                    <button type="submit">"Guardar"</button>
                                    <Show when=move || !message.get().is_empty()>
                                        <p class="settings-form__message">{move || message.get()}</p>
                                    </Show>
                                </form>
                            }
                                .into_any()
                        }
                    })
            }}
        </Suspense>
    }
}
