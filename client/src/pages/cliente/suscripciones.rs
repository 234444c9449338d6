//! Subscription status, plan catalogue and cancellation.
//!
//! The gateway redirects here on `402 Payment Required`, so the page must
//! render even when the company has no active subscription.

#[cfg(test)]
#[path = "suscripciones_test.rs"]
mod suscripciones_test;

use leptos::prelude::*;
use session::{ApiClient, ApiError, Transport, routes};

use super::{NO_COMPANY, current_company};
use crate::components::layout::ProtectedLayout;
use crate::components::status::{EmptyNote, ErrorNote, Loading};
use crate::net::api::{self, Backend};
use crate::net::types::{Plan, Suscripcion};
use crate::util::format::money;

#[derive(Clone, Debug, PartialEq)]
pub struct SubscriptionView {
    pub activa: Option<Suscripcion>,
    pub planes: Vec<Plan>,
}

impl SubscriptionView {
    /// Plan backing the active subscription.
    #[must_use]
    pub fn current_plan(&self) -> Option<&Plan> {
        let plan_id = self.activa.as_ref()?.plan_id?;
        self.planes.iter().find(|p| p.id == plan_id)
    }
}

/// One-line summary of a plan's limits.
#[must_use]
pub fn plan_summary(plan: &Plan) -> String {
    let costo = plan.costo.map_or_else(|| "Sin costo".to_owned(), money);
    let lockers = plan.lockers.map_or_else(|| "lockers ilimitados".to_owned(), |n| format!("{n} lockers"));
    let usuarios =
        plan.limite_usuarios.map_or_else(|| "usuarios ilimitados".to_owned(), |n| format!("{n} usuarios"));
    format!("{costo} · {lockers} · {usuarios}")
}

async fn load<T: Transport>(client: &ApiClient<T>, empresa_id: i64) -> Result<SubscriptionView, ApiError> {
    let activa = api::active_subscription(client, empresa_id).await?;
    let planes = api::fetch_planes(client).await?;
    Ok(SubscriptionView { activa, planes })
}

#[component]
pub fn SuscripcionesPage() -> impl IntoView {
    view! {
        <ProtectedLayout path=routes::SUBSCRIPTIONS title="Suscripciones">
            <SubscriptionPanel/>
        </ProtectedLayout>
    }
}

#[component]
fn SubscriptionPanel() -> impl IntoView {
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

    let cancel = move |id: i64| {
        #[cfg(feature = "hydrate")]
        {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("¿Cancelar la suscripción actual?").ok())
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            let backend = backend.clone();
            leptos::task::spawn_local(async move {
                let result = match backend.client() {
                    Ok(client) => api::cancel_suscripcion(client, id).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(_) => {
                        message.set("Suscripción cancelada.".to_owned());
                        data.refetch();
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
        <Show when=move || !message.get().is_empty()>
            <p class="entity-form__message">{move || message.get()}</p>
        </Show>
        <Suspense fallback=|| view! { <Loading/> }>
            {move || {
                let cancel = cancel.clone();
                data.get()
                    .map(move |result| match result {
                        Ok(view_model) => {
                            let current = view_model.current_plan().map(|p| p.nombre.clone());
                            let status = match (&view_model.activa, current) {
                                (Some(_), Some(plan)) => format!("Suscripción activa: {plan}"),
                                (Some(_), None) => "Suscripción activa".to_owned(),
                                (None, _) => "Sin suscripción activa".to_owned(),
                            };
                            let active_id = view_model.activa.as_ref().map(|s| s.id);
                            let ends = view_model
                                .activa
                                .as_ref()
                                .and_then(|s| s.fecha_fin.clone())
                                .map(|fin| format!("Vigente hasta {fin}"));
                            view! {
                                <section class="subscription-status">
                                    <h2>{status}</h2>
                                    {ends.map(|text| view! { <p>{text}</p> })}
                                    {active_id
                                        .map(|id| {
                                            let cancel = cancel.clone();
                                            view! {
                                                <button class="danger" on:click=move |_| cancel(id)>
                                                    "Cancelar suscripción"
                                                </button>
                                            }
                                        })}
                                </section>
                                <ul class="plan-list">
                                    {view_model
                                        .planes
                                        .iter()
                                        .map(|p| {
                                            view! {
                                                <li>
                                                    <strong>{p.nombre.clone()}</strong>
                                                    <span>{plan_summary(p)}</span>
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
    .into_any()
}
