//! Income report: platform-wide revenue, per-company revenue over a date
//! range, and the monthly trend.

#[cfg(test)]
#[path = "reports_test.rs"]
mod reports_test;

use leptos::prelude::*;
use session::{ApiClient, ApiError, Transport};

use crate::components::layout::ProtectedLayout;
use crate::components::status::{EmptyNote, ErrorNote, KpiCard, Loading};
use crate::net::api::{self, Backend};
use crate::net::types::{CompanyIncome, MonthlyIncome};
use crate::util::format::money;

/// A labelled amount with its bar width as a percentage of the largest row.
#[derive(Clone, Debug, PartialEq)]
pub struct IncomeBar {
    pub label: String,
    pub amount: f64,
    pub width: f64,
}

/// First and last day of `month` (1-12) as `YYYY-MM-DD`.
#[must_use]
pub fn month_bounds(year: i32, month: u32) -> (String, String) {
    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    let last = match month {
        2 if leap => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    };
    (format!("{year:04}-{month:02}-01"), format!("{year:04}-{month:02}-{last:02}"))
}

/// Validate a `YYYY-MM-DD` range from the date inputs.
///
/// # Errors
///
/// A user-facing message when a bound is missing or the range is inverted.
pub fn report_range(fecha_inicio: &str, fecha_fin: &str) -> Result<(String, String), &'static str> {
    let (inicio, fin) = (fecha_inicio.trim(), fecha_fin.trim());
    if inicio.is_empty() || fin.is_empty() {
        return Err("Selecciona fecha de inicio y fin.");
    }
    // ISO dates order lexicographically.
    if inicio > fin {
        return Err("La fecha de inicio debe ser anterior a la fecha fin.");
    }
    Ok((inicio.to_owned(), fin.to_owned()))
}

/// Per-company rows, largest first.
#[must_use]
pub fn company_bars(rows: Vec<CompanyIncome>) -> Vec<IncomeBar> {
    let mut bars = scale(rows.into_iter().map(|r| (r.empresa, r.ingresos.unwrap_or(0.0))).collect());
    bars.sort_by(|a, b| b.amount.total_cmp(&a.amount).then_with(|| a.label.cmp(&b.label)));
    bars
}

/// Monthly rows in backend order; months without a label are dropped.
#[must_use]
pub fn monthly_bars(rows: Vec<MonthlyIncome>) -> Vec<IncomeBar> {
    scale(rows.into_iter().filter_map(|r| Some((r.mes?, r.ingresos.unwrap_or(0.0)))).collect())
}

fn scale(rows: Vec<(String, f64)>) -> Vec<IncomeBar> {
    let max = rows.iter().map(|(_, amount)| *amount).fold(0.0_f64, f64::max);
    rows.into_iter()
        .map(|(label, amount)| IncomeBar {
            label,
            amount,
            width: if max > 0.0 { (amount.max(0.0) / max) * 100.0 } else { 0.0 },
        })
        .collect()
}

#[cfg(feature = "hydrate")]
fn current_month() -> Option<(String, String)> {
    let now = js_sys::Date::new_0();
    let year = i32::try_from(now.get_full_year()).ok()?;
    Some(month_bounds(year, now.get_month() + 1))
}

#[cfg(not(feature = "hydrate"))]
fn current_month() -> Option<(String, String)> {
    None
}

#[derive(Clone, Debug)]
struct PeriodReport {
    total: f64,
    companies: Vec<IncomeBar>,
}

async fn load_period<T: Transport>(client: &ApiClient<T>, inicio: &str, fin: &str) -> Result<PeriodReport, ApiError> {
    let companies = api::incomes_by_company(client, inicio, fin).await?;
    let total = api::income_total_between(client, inicio, fin).await?;
    Ok(PeriodReport { total, companies: company_bars(companies) })
}

#[component]
pub fn ReportsPage() -> impl IntoView {
    view! {
        <ProtectedLayout path="/admin/reports" title="Reportes">
            <IncomeSummary/>
            <IncomeByCompany/>
            <MonthlyIncomeTrend/>
        </ProtectedLayout>
    }
}

#[component]
fn IncomeSummary() -> impl IntoView {
    let backend = expect_context::<Backend>();
    let total = LocalResource::new(move || {
        let backend = backend.clone();
        async move { api::total_income(backend.client()?).await }
    });

    view! {
        <Suspense fallback=|| view! { <Loading/> }>
            {move || {
                total
                    .get()
                    .map(|result| match result {
                        Ok(amount) => view! { <KpiCard label="Ingresos totales" value=money(amount)/> }.into_any(),
                        Err(error) => view! { <ErrorNote error=error/> }.into_any(),
                    })
            }}
        </Suspense>
        <button class="btn" on:click=move |_| total.refetch()>
            "Actualizar"
        </button>
    }
}

#[component]
fn IncomeByCompany() -> impl IntoView {
    let backend = expect_context::<Backend>();
    let inicio = RwSignal::new(String::new());
    let fin = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());
    let range = RwSignal::new(None::<(String, String)>);

    // Effects only run in the browser, where the current month is known.
    Effect::new(move || {
        if let Some((first, last)) = current_month() {
            inicio.set(first);
            fin.set(last);
        }
    });

    let report = LocalResource::new(move || {
        let backend = backend.clone();
        let range = range.get();
        async move {
            match range {
                Some((inicio, fin)) => load_period(backend.client()?, &inicio, &fin).await.map(Some),
                None => Ok(None),
            }
        }
    });

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match report_range(&inicio.get(), &fin.get()) {
            Ok(selected) => {
                message.set(String::new());
                range.set(Some(selected));
            }
            Err(msg) => message.set(msg.to_owned()),
        }
    };

    view! {
        <section class="report-section">
            <h2>"Ingresos por empresa"</h2>
            <form class="entity-form" on:submit=on_search>
                <label>
                    "Fecha inicio"
                    <input
                        type="date"
                        prop:value=move || inicio.get()
                        on:input=move |ev| inicio.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Fecha fin"
                    <input type="date" prop:value=move || fin.get() on:input=move |ev| fin.set(event_target_value(&ev))/>
                </label>
                <button type="submit">"Buscar"</button>
                <Show when=move || !message.get().is_empty()>
                    <p class="entity-form__message">{move || message.get()}</p>
                </Show>
            </form>
            <Suspense fallback=|| view! { <Loading/> }>
                {move || {
                    report
                        .get()
                        .map(|result| match result {
                            Ok(None) => view! { <EmptyNote message="Selecciona un periodo y pulsa Buscar."/> }.into_any(),
                            Ok(Some(report)) => {
                                view! {
                                    <KpiCard label="Ingresos del periodo" value=money(report.total)/>
                                    <IncomeBars bars=report.companies empty="Sin ingresos en el periodo."/>
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
fn MonthlyIncomeTrend() -> impl IntoView {
    let backend = expect_context::<Backend>();
    let months = LocalResource::new(move || {
        let backend = backend.clone();
        async move { api::monthly_income(backend.client()?).await }
    });

    view! {
        <section class="report-section">
            <h2>"Evolución mensual de ingresos"</h2>
            <Suspense fallback=|| view! { <Loading/> }>
                {move || {
                    months
                        .get()
                        .map(|result| match result {
                            Ok(rows) => {
                                view! { <IncomeBars bars=monthly_bars(rows) empty="Sin ingresos registrados."/> }
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
fn IncomeBars(bars: Vec<IncomeBar>, empty: &'static str) -> impl IntoView {
    if bars.is_empty() {
        return view! { <EmptyNote message=empty/> }.into_any();
    }
    view! {
        <table class="data-table">
            <tbody>
                {bars
                    .into_iter()
                    .map(|bar| {
                        let style = format!("width: {:.1}%", bar.width);
                        view! {
                            <tr>
                                <td>{bar.label}</td>
                                <td class="bar-cell">
                                    <span class="bar" style=style></span>
                                </td>
                                <td>{money(bar.amount)}</td>
                            </tr>
                        }
                    })
                    .collect::<Vec<_>>()}
            </tbody>
        </table>
    }
    .into_any()
}
