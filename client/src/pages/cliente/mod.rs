//! Client area (`/cliente/*`), scoped to the signed-in user's company.

pub mod dashboard;
pub mod lockers;
pub mod monitoreo;
pub mod register_user;
pub mod settings;
pub mod suscripciones;

use leptos::prelude::*;

use crate::state::auth::AuthSnapshot;

const NO_COMPANY: &str = "Tu cuenta no tiene una empresa asignada.";

/// Company of the signed-in user, read once when the page mounts.
fn current_company() -> Option<i64> {
    expect_context::<RwSignal<AuthSnapshot>>().with_untracked(AuthSnapshot::company_id)
}
