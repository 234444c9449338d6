//! Loading, error and KPI fragments shared by the data pages.

use leptos::prelude::*;
use session::ApiError;

#[component]
pub fn Loading() -> impl IntoView {
    view! { <p class="status status--loading">"Cargando..."</p> }
}

#[component]
pub fn ErrorNote(error: ApiError) -> impl IntoView {
    view! { <p class="status status--error">{error.user_message()}</p> }
}

#[component]
pub fn EmptyNote(message: &'static str) -> impl IntoView {
    view! { <p class="status status--empty">{message}</p> }
}

#[component]
pub fn KpiCard(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="kpi-card">
            <span class="kpi-card__value">{value}</span>
            <span class="kpi-card__label">{label}</span>
        </div>
    }
}
