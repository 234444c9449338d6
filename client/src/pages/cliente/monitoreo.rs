//! Live sensor readings for the company's active lockers.
//!
//! Readings come from the sensor store keyed by `LOCKER_NNN`; the page
//! keeps only those matching an active locker and can refresh itself every
//! few seconds.

#[cfg(test)]
#[path = "monitoreo_test.rs"]
mod monitoreo_test;

use leptos::prelude::*;
use session::{ApiClient, ApiError, Transport};

use super::{NO_COMPANY, current_company};
use crate::components::layout::ProtectedLayout;
use crate::components::status::{EmptyNote, ErrorNote, Loading};
use crate::net::api::{self, Backend};
use crate::net::types::Lectura;
use crate::util::format::reading;
use crate::util::monitoring::{Freshness, active_readings, display_id, freshness_now};

/// Seconds between automatic refreshes.
pub const REFRESH_SECS: u64 = 5;

/// CSS modifier for a freshness badge.
#[must_use]
pub fn badge_class(freshness: Freshness) -> &'static str {
    match freshness {
        Freshness::Ok => "badge badge--ok",
        Freshness::Stale => "badge badge--stale",
        Freshness::NoData => "badge badge--empty",
    }
}

async fn load<T: Transport>(client: &ApiClient<T>, empresa_id: i64) -> Result<Vec<Lectura>, ApiError> {
    let lockers = api::fetch_company_lockers(client, empresa_id).await?;
    let lecturas = api::latest_readings(client).await?;
    Ok(active_readings(&lockers, lecturas))
}

#[component]
pub fn MonitoreoPage() -> impl IntoView {
    view! {
        <ProtectedLayout path="/cliente/monitoreo" title="Monitoreo">
            <ReadingsBoard/>
        </ProtectedLayout>
    }
}

#[component]
fn ReadingsBoard() -> impl IntoView {
    let Some(empresa_id) = current_company() else {
        return view! { <EmptyNote message=NO_COMPANY/> }.into_any();
    };
    let backend = expect_context::<Backend>();
    let auto = RwSignal::new(true);
    let tick = RwSignal::new(0_u32);

    let readings = LocalResource::new(move || {
        tick.track();
        let backend = backend.clone();
        async move { load(backend.client()?, empresa_id).await }
    });

    #[cfg(feature = "hydrate")]
    {
        let poll_alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let poll_alive_task = poll_alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_secs(REFRESH_SECS)).await;
                if !poll_alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                    break;
                }
                if auto.get_untracked() {
                    tick.update(|t| *t = t.wrapping_add(1));
                }
            }
        });
        on_cleanup(move || poll_alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    view! {
        <div class="toolbar">
            <label>
                <input
                    type="checkbox"
                    prop:checked=move || auto.get()
                    on:change=move |ev| auto.set(event_target_checked(&ev))
                />
                {format!(" Actualizar cada {REFRESH_SECS} s")}
            </label>
            <button on:click=move |_| tick.update(|t| *t = t.wrapping_add(1))>"Actualizar"</button>
        </div>
        <Suspense fallback=|| view! { <Loading/> }>
            {move || {
                readings
                    .get()
                    .map(|result| match result {
                        Ok(list) if list.is_empty() => {
                            view! { <EmptyNote message="Sin lecturas para lockers activos."/> }.into_any()
                        }
                        Ok(list) => view! { <ReadingsTable lecturas=list/> }.into_any(),
                        Err(error) => view! { <ErrorNote error=error/> }.into_any(),
                    })
            }}
        </Suspense>
    }
    .into_any()
}

#[component]
fn ReadingsTable(lecturas: Vec<Lectura>) -> impl IntoView {
    view! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>"Locker"</th>
                    <th>"Temperatura"</th>
                    <th>"Humedad"</th>
                    <th>"Peso"</th>
                    <th>"Estado"</th>
                </tr>
            </thead>
            <tbody>
                {lecturas
                    .into_iter()
                    .map(|l| {
                        let freshness = freshness_now(&l);
                        let id = l.locker_id.as_deref().map(display_id).unwrap_or_default().to_owned();
                        view! {
                            <tr>
                                <td>{id}</td>
                                <td>{reading(l.temperatura, "°C")}</td>
                                <td>{reading(l.humedad, "%")}</td>
                                <td>{reading(l.peso, "kg")}</td>
                                <td>
                                    <span class=badge_class(freshness)>{freshness.label()}</span>
                                </td>
                            </tr>
                        }
                    })
                    .collect::<Vec<_>>()}
            </tbody>
        </table>
    }
}
