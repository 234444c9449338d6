//! Company registry: create tenants and list existing ones.

#[cfg(test)]
#[path = "register_company_test.rs"]
mod register_company_test;

use leptos::prelude::*;

use crate::components::layout::ProtectedLayout;
use crate::components::status::{EmptyNote, ErrorNote, Loading};
use crate::net::api::{self, Backend};
use crate::net::types::{Empresa, EmpresaForm};

/// Validate the new-company inputs.
///
/// # Errors
///
/// A user-facing message when the name is blank.
pub fn company_form(nombre: &str, direccion: &str, telefono: &str) -> Result<EmpresaForm, &'static str> {
    let nombre = nombre.trim();
    if nombre.is_empty() {
        return Err("El nombre de la empresa es obligatorio.");
    }
    Ok(EmpresaForm {
        nombre: nombre.to_owned(),
        direccion: direccion.trim().to_owned(),
        telefono: telefono.trim().to_owned(),
    })
}

/// Case-insensitive name/address search.
#[must_use]
pub fn filter_companies(empresas: Vec<Empresa>, query: &str) -> Vec<Empresa> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return empresas;
    }
    empresas
        .into_iter()
        .filter(|e| {
            e.nombre.to_lowercase().contains(&query)
                || e.direccion.as_deref().is_some_and(|d| d.to_lowercase().contains(&query))
        })
        .collect()
}

#[component]
pub fn RegisterCompanyPage() -> impl IntoView {
    view! {
        <ProtectedLayout path="/admin/register-company" title="Registrar Empresa">
            <CompanyRegistry/>
        </ProtectedLayout>
    }
}

#[component]
fn CompanyRegistry() -> impl IntoView {
    let backend = expect_context::<Backend>();
    let nombre = RwSignal::new(String::new());
    let direccion = RwSignal::new(String::new());
    let telefono = RwSignal::new(String::new());
    let search = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());

    let empresas = LocalResource::new({
        let backend = backend.clone();
        move || {
            let backend = backend.clone();
            async move { api::fetch_empresas(backend.client()?).await }
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = match company_form(&nombre.get(), &direccion.get(), &telefono.get()) {
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
                let result = match backend.client() {
                    Ok(client) => api::create_empresa(client, &form).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(_) => {
                        nombre.set(String::new());
                        direccion.set(String::new());
                        telefono.set(String::new());
                        message.set("Empresa registrada.".to_owned());
                        empresas.refetch();
                    }
                    Err(err) => message.set(err.user_message()),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (form, &backend);
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
                type="text"
                placeholder="Dirección"
                prop:value=move || direccion.get()
                on:input=move |ev| direccion.set(event_target_value(&ev))
            />
            <input
                type="tel"
                placeholder="Teléfono"
                prop:value=move || telefono.get()
                on:input=move |ev| telefono.set(event_target_value(&ev))
            />
            <button type="submit">"Registrar"</button>
            <Show when=move || !message.get().is_empty()>
                <p class="entity-form__message">{move || message.get()}</p>
            </Show>
        </form>
        <input
            class="search-input"
            type="search"
            placeholder="Buscar empresa"
            prop:value=move || search.get()
            on:input=move |ev| search.set(event_target_value(&ev))
        />
        <Suspense fallback=|| view! { <Loading/> }>
            {move || {
                empresas
                    .get()
                    .map(|result| match result {
                        Ok(list) => {
                            let list = filter_companies(list, &search.get());
                            if list.is_empty() {
                                return view! { <EmptyNote message="Sin empresas."/> }.into_any();
                            }
                            view! {
                                <ul class="company-list">
                                    {list
                                        .into_iter()
                                        .map(|e| {
                                            view! {
                                                <li>
                                                    <strong>{e.nombre}</strong>
                                                    <span>{e.direccion.unwrap_or_default()}</span>
                                                    <span>{e.telefono.unwrap_or_default()}</span>
                                                </li>
                                            }
                                        })
                                        .collect::<Vec<_>>()}
                                </ul>
                            }
                                .into_any()
                        }
                        Err(error) => view! { <ErrorNote error=error/> }.into_any(),
                    })
            }}
        </Suspense>
    }
}
