//! Employee accounts for the signed-in user's company: register, edit,
//! and remove.

#[cfg(test)]
#[path = "register_user_test.rs"]
mod register_user_test;

use leptos::prelude::*;

use super::{NO_COMPANY, current_company};
use crate::components::layout::ProtectedLayout;
use crate::components::status::{EmptyNote, ErrorNote, Loading};
use crate::net::api::{self, Backend, EMPLOYEE_ROLE_ID};
use crate::net::types::{Usuario, UsuarioForm};

const MIN_PASSWORD_LEN: usize = 6;
const REQUIRED_FIELDS: &str = "Todos los campos son obligatorios.";

/// Validate the new-employee inputs and bind them to `empresa_id`.
///
/// # Errors
///
/// A user-facing message naming the first invalid field.
pub fn employee_form(
    nombre: &str,
    correo: &str,
    contrasena: &str,
    empresa_id: i64,
) -> Result<UsuarioForm, &'static str> {
    if contrasena.is_empty() {
        return Err(REQUIRED_FIELDS);
    }
    employee_update_form(nombre, correo, contrasena, empresa_id)
}

/// Validate an employee edit. A blank password keeps the current one.
///
/// # Errors
///
/// A user-facing message naming the first invalid field.
pub fn employee_update_form(
    nombre: &str,
    correo: &str,
    contrasena: &str,
    empresa_id: i64,
) -> Result<UsuarioForm, &'static str> {
    let nombre = nombre.trim();
    let correo = correo.trim();
    if nombre.is_empty() || correo.is_empty() {
        return Err(REQUIRED_FIELDS);
    }
    if !correo.contains('@') {
        return Err("Correo electrónico inválido.");
    }
    if !contrasena.is_empty() && contrasena.chars().count() < MIN_PASSWORD_LEN {
        return Err("La contraseña debe tener al menos 6 caracteres.");
    }
    Ok(UsuarioForm {
        nombre: nombre.to_owned(),
        correo: correo.to_owned(),
        contrasena: (!contrasena.is_empty()).then(|| contrasena.to_owned()),
        rol_id: Some(EMPLOYEE_ROLE_ID),
        empresa_id: Some(empresa_id),
    })
}

#[component]
pub fn RegisterUserPage() -> impl IntoView {
    view! {
        <ProtectedLayout path="/cliente/register-user" title="Registrar Empleado">
            <EmployeeRegistry/>
        </ProtectedLayout>
    }
}

#[component]
fn EmployeeRegistry() -> impl IntoView {
    let Some(empresa_id) = current_company() else {
        return view! { <EmptyNote message=NO_COMPANY/> }.into_any();
    };
    let backend = expect_context::<Backend>();
    let nombre = RwSignal::new(String::new());
    let correo = RwSignal::new(String::new());
    let contrasena = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());
    let editing = RwSignal::new(None::<i64>);

    let reset_form = move || {
        editing.set(None);
        nombre.set(String::new());
        correo.set(String::new());
        contrasena.set(String::new());
    };

    let empleados = LocalResource::new({
        let backend = backend.clone();
        move || {
            let backend = backend.clone();
            async move { api::fetch_employees(backend.client()?, empresa_id).await }
        }
    });

    let on_submit = {
        let backend = backend.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let target = editing.get();
            let validated = match target {
                Some(_) => employee_update_form(&nombre.get(), &correo.get(), &contrasena.get(), empresa_id),
                None => employee_form(&nombre.get(), &correo.get(), &contrasena.get(), empresa_id),
            };
            let form = match validated {
                Ok(form) => form,
                Err(msg) => {
                    message.set(msg.to_owned());
                    return;
                }
            };
            #[cfg(feature = "hydrate")]
            {
                let backend = backend.clone();
                leptos::task::spawn_local(async move {
                    let result = match (backend.client(), target) {
                        (Ok(client), Some(id)) => api::update_usuario(client, &id.to_string(), &form).await,
                        (Ok(client), None) => api::create_usuario(client, &form).await,
                        (Err(err), _) => Err(err),
                    };
                    match result {
                        Ok(_) => {
                            reset_form();
                            let done = if target.is_some() { "Empleado actualizado." } else { "Empleado registrado." };
                            message.set(done.to_owned());
                            empleados.refetch();
                        }
                        Err(err) => message.set(err.user_message()),
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (form, &backend, reset_form);
            }
        }
    };

    let edit = move |usuario: &Usuario| {
        editing.set(Some(usuario.id));
        nombre.set(usuario.nombre.clone());
        correo.set(usuario.correo.clone());
        contrasena.set(String::new());
        message.set(String::new());
    };

    let remove = move |id: i64| {
        #[cfg(feature = "hydrate")]
        {
            let backend = backend.clone();
            leptos::task::spawn_local(async move {
                let result = match backend.client() {
                    Ok(client) => api::delete_usuario(client, id).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(()) => {
                        message.set("Empleado eliminado.".to_owned());
                        empleados.refetch();
                    }
                    Err(err) => message.set(err.user_message()),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, &backend);
        }
    };

    view! {
        <form class="entity-form" on:submit=on_submit>
            <input
                type="text"
                placeholder="Nombre"
                prop:value=move || nombre.get()
                on:input=move |ev| nombre.set(event_target_value(&ev))
            />
            <input
                type="email"
                placeholder="Correo"
                prop:value=move || correo.get()
                on:input=move |ev| correo.set(event_target_value(&ev))
            />
            <input
                type="password"
                placeholder=move || if editing.get().is_some() { "Nueva contraseña (opcional)" } else { "Contraseña" }
                prop:value=move || contrasena.get()
                on:input=move |ev| contrasena.set(event_target_value(&ev))
            />
            <button type="submit">{move || if editing.get().is_some() { "Guardar cambios" } else { "Registrar" }}</button>
            <Show when=move || editing.get().is_some()>
                <button type="button" on:click=move |_| reset_form()>
                    "Cancelar"
                </button>
            </Show>
            <Show when=move || !message.get().is_empty()>
                <p class="entity-form__message">{move || message.get()}</p>
            </Show>
        </form>
        <Suspense fallback=|| view! { <Loading/> }>
            {move || {
                let remove = remove.clone();
                empleados
                    .get()
                    .map(move |result| match result {
                        Ok(list) if list.is_empty() => {
                            view! { <EmptyNote message="Sin empleados registrados."/> }.into_any()
                        }
                        Ok(list) => {
                            view! {
                                <table class="data-table">
                                    <thead>
                                        <tr>
                                            <th>"Nombre"</th>
                                            <th>"Correo"</th>
                                            <th></th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {list
                                            .into_iter()
                                            .map(|u| {
                                                let remove = remove.clone();
                                                let id = u.id;
                                                let selected = u.clone();
                                                view! {
                                                    <tr>
                                                        <td>{u.nombre}</td>
                                                        <td>{u.correo}</td>
                                                        <td>
                                                            <button on:click=move |_| edit(&selected)>"Editar"</button>
                                                            <button class="danger" on:click=move |_| remove(id)>
                                                                "Eliminar"
                                                            </button>
                                                        </td>
                                                    </tr>
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                    </tbody>
                                </table>
                            }
                                .into_any()
                        }
                        Err(error) => view! { <ErrorNote error=error/> }.into_any(),
                    })
            }}
        </Suspense>
    }
    .into_any()
}
