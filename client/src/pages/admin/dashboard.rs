//! SuperAdmin overview: platform-wide counts.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use session::{ApiClient, ApiError, Transport, routes};

use crate::components::layout::ProtectedLayout;
use crate::components::status::{ErrorNote, KpiCard, Loading};
use crate::net::api::{self, Backend};
use crate::net::types::Suscripcion;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformCounts {
    pub empresas: usize,
    pub administradores: usize,
    pub lockers: usize,
    pub suscripciones_activas: usize,
}

#[must_use]
pub fn active_count(suscripciones: &[Suscripcion]) -> usize {
    suscripciones.iter().filter(|s| s.is_active()).count()
}

/// Fetch the four collections the overview counts.
///
/// # Errors
///
/// The first gateway error.
pub async fn load_counts<T: Transport>(client: &ApiClient<T>) -> Result<PlatformCounts, ApiError> {
    let empresas = api::fetch_empresas(client).await?.len();
    let administradores = api::fetch_admin_users(client).await?.len();
    let lockers = api::fetch_lockers(client).await?.len();
    let suscripciones = api::fetch_suscripciones(client).await?;
    Ok(PlatformCounts { empresas, administradores, lockers, suscripciones_activas: active_count(&suscripciones) })
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    view! {
        <ProtectedLayout path=routes::ADMIN_DASHBOARD title="Dashboard">
            <PlatformOverview/>
        </ProtectedLayout>
    }
}

#[component]
fn PlatformOverview() -> impl IntoView {
    let backend = expect_context::<Backend>();
    let counts = LocalResource::new(move || {
        let backend = backend.clone();
        async move { load_counts(backend.client()?).await }
    });

    view! {
        <Suspense fallback=|| view! { <Loading/> }>
            {move || {
                counts
                    .get()
                    .map(|result| match result {
                        Ok(c) => {
                            view! {
                                <div class="kpi-grid">
                                    <KpiCard label="Empresas" value=c.empresas.to_string()/>
                                    <KpiCard label="Administradores" value=c.administradores.to_string()/>
                                    <KpiCard label="Lockers" value=c.lockers.to_string()/>
                                    <KpiCard
                                        label="Suscripciones activas"
                                        value=c.suscripciones_activas.to_string()
                                    />
                                </div>
                            }
                                .into_any()
                        }
                        Err(error) => view! { <ErrorNote error=error/> }.into_any(),
                    })
            }}
        </Suspense>
    }
}
