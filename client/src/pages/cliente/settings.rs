//! Client account settings.

use leptos::prelude::*;

use crate::components::layout::ProtectedLayout;
use crate::components::profile_settings::ProfileSettings;

#[component]
pub fn ClientSettingsPage() -> impl IntoView {
    view! {
        <ProtectedLayout path="/cliente/settings" title="Configuración">
            <ProfileSettings/>
        </ProtectedLayout>
    }
}
