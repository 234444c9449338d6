//! Company lockers and their assignment to employees.

#[cfg(test)]
#[path = "lockers_test.rs"]
mod lockers_test;

use leptos::prelude::*;
use session::{ApiClient, ApiError, Transport};

use super::{NO_COMPANY, current_company};
use crate::components::layout::ProtectedLayout;
use crate::components::status::{EmptyNote, ErrorNote, Loading};
use crate::net::api::{self, Backend};
use crate::net::types::{Locker, Usuario};

/// Parse the assignment `<select>` value: empty means unassigned.
#[must_use]
pub fn parse_assignee(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

/// Name of the employee holding `locker`, if any.
#[must_use]
pub fn assignee_name<'a>(locker: &Locker, empleados: &'a [Usuario]) -> Option<&'a str> {
    let id = locker.usuario_id?;
    empleados.iter().find(|u| u.id == id).map(|u| u.nombre.as_str())
}

async fn load<T: Transport>(client: &ApiClient<T>, empresa_id: i64) -> Result<(Vec<Locker>, Vec<Usuario>), ApiError> {
    let lockers = api::fetch_company_lockers(client, empresa_id).await?;
    let empleados = api::fetch_employees(client, empresa_id).await?;
    Ok((lockers, empleados))
}

#[component]
pub fn LockersPage() -> impl IntoView {
    view! {
        <ProtectedLayout path="/cliente/lockers" title="Lockers">
            <LockerAssignments/>
        </ProtectedLayout>
    }
}

#[component]
fn LockerAssignments() -> impl IntoView {
    let Some(empresa_id) = current_company() else {
        return view! { <EmptyNote message=NO_COMPANY/> }.into_any();
    };
    let backend = expect_context::<Backend>();
    let message = RwSignal::new(String::new());

    let data = LocalResource::new({
        let backend = backend.clone();
        move || {
            let backend = backend.clone();
            async move { load(backend.client()?, empresa_id).await }
        }
    });

    let assign = move |locker_id: i64, usuario_id: Option<i64>| {
        #[cfg(feature = "hydrate")]
        {
            let backend = backend.clone();
            leptos::task::spawn_local(async move {
                let result = match backend.client() {
                    Ok(client) => api::assign_locker(client, locker_id, usuario_id).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(_) => {
                        message.set("Asignación actualizada.".to_owned());
                        data.refetch();
                    }
                    Err(err) => message.set(err.user_message()),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (locker_id, usuario_id, &backend);
        }
    };

    view! {
        <Show when=move || !message.get().is_empty()>
            <p class="entity-form__message">{move || message.get()}</p>
        </Show>
        <Suspense fallback=|| view! { <Loading/> }>
            {move || {
                let assign = assign.clone();
                data.get()
                    .map(move |result| match result {
                        Ok((lockers, _)) if lockers.is_empty() => {
                            view! { <EmptyNote message="Tu empresa no tiene lockers."/> }.into_any()
                        }
                        Ok((lockers, empleados)) => {
                            view! {
                                <table class="data-table">
                                    <thead>
                                        <tr>
                                            <th>"Identificador"</th>
                                            <th>"Ubicación"</th>
                                            <th>"Estado"</th>
                                            <th>"Asignado a"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {lockers
                                            .into_iter()
                                            .map(|locker| {
                                                let assign = assign.clone();
                                                let current = locker.usuario_id;
                                                let holder = assignee_name(&locker, &empleados)
                                                    .unwrap_or("Sin asignar")
                                                    .to_owned();
                                                let options = empleados
                                                    .iter()
                                                    .map(|u| {
                                                        view! {
                                                            <option value=u.id.to_string() selected=current == Some(u.id)>
                                                                {u.nombre.clone()}
                                                            </option>
                                                        }
                                                    })
                                                    .collect::<Vec<_>>();
                                                view! {
                                                    <tr>
                                                        <td>{locker.identificador.clone().unwrap_or_default()}</td>
                                                        <td>{locker.ubicacion.clone().unwrap_or_default()}</td>
                                                        <td>{locker.estado.clone().unwrap_or_default()}</td>
                                                        <td>
                                                            <select
                                                                title=holder
                                                                on:change=move |ev| {
                                                                    assign(locker.id, parse_assignee(&event_target_value(&ev)));
                                                                }
                                                            >
                                                                <option value="" selected=current.is_none()>
                                                                    "Sin asignar"
                                                                </option>
                                                                {options}
                                                            </select>
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
