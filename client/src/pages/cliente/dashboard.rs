//! Client overview: lockers, employees and subscription state.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use session::{ApiClient, ApiError, Transport, routes};

use super::{NO_COMPANY, current_company};
use crate::components::layout::ProtectedLayout;
use crate::components::status::{EmptyNote, ErrorNote, KpiCard, Loading};
use crate::net::api::{self, Backend};
use crate::net::types::Locker;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompanyCounts {
    pub lockers: usize,
    pub lockers_activos: usize,
    pub lockers_asignados: usize,
    pub empleados: usize,
    pub suscripcion_activa: bool,
}

#[must_use]
pub fn locker_counts(lockers: &[Locker]) -> (usize, usize) {
    let active = lockers.iter().filter(|l| l.is_active()).count();
    let assigned = lockers.iter().filter(|l| l.usuario_id.is_some()).count();
    (active, assigned)
}

async fn load<T: Transport>(client: &ApiClient<T>, empresa_id: i64) -> Result<CompanyCounts, ApiError> {
    let lockers = api::fetch_company_lockers(client, empresa_id).await?;
    let empleados = api::fetch_employees(client, empresa_id).await?.len();
    let suscripcion_activa = api::subscription_status(client, empresa_id).await?.activa;
    let (lockers_activos, lockers_asignados) = locker_counts(&lockers);
    Ok(CompanyCounts { lockers: lockers.len(), lockers_activos, lockers_asignados, empleados, suscripcion_activa })
}

#[component]
pub fn ClientDashboardPage() -> impl IntoView {
    view! {
        <ProtectedLayout path=routes::CLIENT_DASHBOARD title="Dashboard">
            <CompanyOverview/>
        </ProtectedLayout>
    }
}

#[component]
fn CompanyOverview() -> impl IntoView {
    let Some(empresa_id) = current_company() else {
        return view! { <EmptyNote message=NO_COMPANY/> }.into_any();
    };
    let backend = expect_context::<Backend>();
    let counts = LocalResource::new(move || {
        let backend = backend.clone();
        async move { load(backend.client()?, empresa_id).await }
    });

    view! {
        <Suspense fallback=|| view! { <Loading/> }>
            {move || {
                counts
                    .get()
                    .map(|result| match result {
                        Ok(c) => {
                            let estado = if c.suscripcion_activa { "Activa" } else { "Inactiva" };
                            view! {
                                <div class="kpi-grid">
                                    <KpiCard label="Lockers" value=c.lockers.to_string()/>
                                    <KpiCard label="Lockers activos" value=c.lockers_activos.to_string()/>
                                    <KpiCard label="Lockers asignados" value=c.lockers_asignados.to_string()/>
                                    <KpiCard label="Empleados" value=c.empleados.to_string()/>
                                    <KpiCard label="Suscripción" value=estado.to_owned()/>
                                </div>
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
