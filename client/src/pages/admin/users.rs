//! Company administrators across all tenants.

use leptos::prelude::*;

use crate::components::layout::ProtectedLayout;
use crate::components::status::{EmptyNote, ErrorNote, Loading};
use crate::net::api::{self, Backend};

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    view! {
        <ProtectedLayout path="/admin/users" title="Usuarios">
            <AdminUserTable/>
        </ProtectedLayout>
    }
}

#[component]
fn AdminUserTable() -> impl IntoView {
    let backend = expect_context::<Backend>();
    let users = LocalResource::new(move || {
        let backend = backend.clone();
        async move { api::fetch_admin_users(backend.client()?).await }
    });

    view! {
        <Suspense fallback=|| view! { <Loading/> }>
            {move || {
                users
                    .get()
                    .map(|result| match result {
                        Ok(list) if list.is_empty() => {
                            view! { <EmptyNote message="No hay administradores registrados."/> }.into_any()
                        }
                        Ok(list) => {
                            view! {
                                <table class="data-table">
                                    <thead>
                                        <tr>
                                            <th>"Nombre"</th>
                                            <th>"Correo"</th>
                                            <th>"Empresa"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {list
                                            .into_iter()
                                            .map(|u| {
                                                view! {
                                                    <tr>
                                                        <td>{u.nombre}</td>
                                                        <td>{u.correo}</td>
                                                        <td>{u.empresa.unwrap_or_else(|| "-".to_owned())}</td>
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
}
