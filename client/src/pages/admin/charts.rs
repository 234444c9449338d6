//! Subscription status per company, latest subscriptions, and monthly
//! subscription volume.

#[cfg(test)]
#[path = "charts_test.rs"]
mod charts_test;

use leptos::prelude::*;
use session::{ApiClient, ApiError, Transport};

use crate::components::layout::ProtectedLayout;
use crate::components::status::{EmptyNote, ErrorNote, KpiCard, Loading};
use crate::net::api::{self, Backend};
use crate::net::types::{Empresa, LatestSubscription, MonthlySubscriptions, Suscripcion};
use crate::util::format::money;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompanyStatus {
    pub empresa: String,
    pub activa: bool,
}

/// Pair every company with whether it holds an active subscription.
/// Active companies sort first, then by name.
#[must_use]
pub fn company_statuses(empresas: &[Empresa], suscripciones: &[Suscripcion]) -> Vec<CompanyStatus> {
    let mut rows: Vec<CompanyStatus> = empresas
        .iter()
        .map(|e| CompanyStatus {
            empresa: e.nombre.clone(),
            activa: suscripciones.iter().any(|s| s.empresa_id == Some(e.id) && s.is_active()),
        })
        .collect();
    rows.sort_by(|a, b| b.activa.cmp(&a.activa).then_with(|| a.empresa.cmp(&b.empresa)));
    rows
}

/// Counts over `/suscripciones/ultimas` rows by state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubscriptionTally {
    pub activas: usize,
    pub inactivas: usize,
    pub otras: usize,
}

#[must_use]
pub fn tally_latest(rows: &[LatestSubscription]) -> SubscriptionTally {
    rows.iter().fold(SubscriptionTally::default(), |mut tally, row| {
        match row.estado.as_deref().map(str::to_lowercase).as_deref() {
            Some("activa") => tally.activas += 1,
            Some("inactiva") => tally.inactivas += 1,
            _ => tally.otras += 1,
        }
        tally
    })
}

#[derive(Clone, Debug, PartialEq)]
pub struct MonthlyRow {
    pub periodo: String,
    pub suscripciones: i64,
    pub ingresos: f64,
}

/// Monthly volume keyed by `YYYY-MM`, oldest first. Rows without a period
/// are dropped.
#[must_use]
pub fn monthly_rows(rows: Vec<MonthlySubscriptions>) -> Vec<MonthlyRow> {
    let mut out: Vec<MonthlyRow> = rows
        .into_iter()
        .filter_map(|r| {
            Some(MonthlyRow {
                periodo: r.period()?,
                suscripciones: r.total_suscripciones.unwrap_or(0),
                ingresos: r.total_ingresos.unwrap_or(0.0),
            })
        })
        .collect();
    out.sort_by(|a, b| a.periodo.cmp(&b.periodo));
    out
}

fn state_badge(estado: Option<&str>) -> (&'static str, String) {
    let label = estado.filter(|e| !e.is_empty()).unwrap_or("Sin estado").to_owned();
    let class = match label.to_lowercase().as_str() {
        "activa" => "badge badge--ok",
        "inactiva" => "badge badge--off",
        _ => "badge badge--stale",
    };
    (class, label)
}

async fn load<T: Transport>(client: &ApiClient<T>) -> Result<Vec<CompanyStatus>, ApiError> {
    let empresas = api::fetch_empresas(client).await?;
    let suscripciones = api::fetch_suscripciones(client).await?;
    Ok(company_statuses(&empresas, &suscripciones))
}

#[component]
pub fn ChartsPage() -> impl IntoView {
    view! {
        <ProtectedLayout path="/admin/charts" title="Empresa Status">
            <CompanyStatusBoard/>
            <LatestSubscriptions/>
            <MonthlySubscriptionVolume/>
        </ProtectedLayout>
    }
}

#[component]
fn CompanyStatusBoard() -> impl IntoView {
    let backend = expect_context::<Backend>();
    let rows = LocalResource::new(move || {
        let backend = backend.clone();
        async move { load(backend.client()?).await }
    });

    view! {
        <Suspense fallback=|| view! { <Loading/> }>
            {move || {
                rows.get()
                    .map(|result| match result {
                        Ok(rows) => {
                            let active = rows.iter().filter(|r| r.activa).count();
                            let inactive = rows.len() - active;
                            view! {
                                <div class="kpi-grid">
                                    <KpiCard label="Con suscripción activa" value=active.to_string()/>
                                    <KpiCard label="Sin suscripción" value=inactive.to_string()/>
                                </div>
                                <ul class="status-list">
                                    {rows
                                        .into_iter()
                                        .map(|r| {
                                            let class = if r.activa { "badge badge--ok" } else { "badge badge--off" };
                                            let label = if r.activa { "Activa" } else { "Inactiva" };
                                            view! {
                                                <li>
                                                    <span>{r.empresa}</span>
                                                    <span class=class>{label}</span>
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

#[component]
fn LatestSubscriptions() -> impl IntoView {
    let backend = expect_context::<Backend>();
    let latest = LocalResource::new(move || {
        let backend = backend.clone();
        async move { api::latest_subscriptions(backend.client()?).await }
    });

    view! {
        <section class="report-section">
            <h2>"Últimas suscripciones"</h2>
            <Suspense fallback=|| view! { <Loading/> }>
                {move || {
                    latest
                        .get()
                        .map(|result| match result {
                            Ok(rows) if rows.is_empty() => {
                                view! { <EmptyNote message="Sin suscripciones registradas."/> }.into_any()
                            }
                            Ok(rows) => {
                                let tally = tally_latest(&rows);
                                view! {
                                    <div class="kpi-grid">
                                        <KpiCard label="Activas" value=tally.activas.to_string()/>
                                        <KpiCard label="Inactivas" value=tally.inactivas.to_string()/>
                                        <KpiCard label="Otras" value=tally.otras.to_string()/>
                                    </div>
                                    <table class="data-table">
                                        <thead>
                                            <tr>
                                                <th>"Empresa"</th>
                                                <th>"Estado"</th>
                                                <th>"Inicio"</th>
                                                <th>"Fin"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {rows
                                                .into_iter()
                                                .map(|row| {
                                                    let (class, label) = state_badge(row.estado.as_deref());
                                                    view! {
                                                        <tr>
                                                            <td>{row.empresa_nombre.unwrap_or_default()}</td>
                                                            <td>
                                                                <span class=class>{label}</span>
                                                            </td>
                                                            <td>{row.fecha_inicio.unwrap_or_else(|| "--".to_owned())}</td>
                                                            <td>{row.fecha_fin.unwrap_or_else(|| "--".to_owned())}</td>
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
        </section>
    }
}

#[component]
fn MonthlySubscriptionVolume() -> impl IntoView {
    let backend = expect_context::<Backend>();
    let monthly = LocalResource::new(move || {
        let backend = backend.clone();
        async move { api::monthly_subscriptions(backend.client()?).await }
    });

    view! {
        <section class="report-section">
            <h2>"Suscripciones por mes"</h2>
            <Suspense fallback=|| view! { <Loading/> }>
                {move || {
                    monthly
                        .get()
                        .map(|result| match result.map(monthly_rows) {
                            Ok(rows) if rows.is_empty() => {
                                view! { <EmptyNote message="Sin datos mensuales."/> }.into_any()
                            }
                            Ok(rows) => {
                                view! {
                                    <table class="data-table">
                                        <thead>
                                            <tr>
                                                <th>"Mes"</th>
                                                <th>"Suscripciones"</th>
                                                <th>"Ingresos"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {rows
                                                .into_iter()
                                                .map(|row| {
                                                    view! {
                                                        <tr>
                                                            <td>{row.periodo}</td>
                                                            <td>{row.suscripciones}</td>
                                                            <td>{money(row.ingresos)}</td>
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
        </section>
    }
}
