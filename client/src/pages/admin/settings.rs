//! SuperAdmin account settings.

use leptos::prelude::*;

use crate::components::layout::ProtectedLayout;
use crate::components::profile_settings::ProfileSettings;

#[component]
pub fn AdminSettingsPage() -> impl IntoView {
    view! {
        <ProtectedLayout path="/admin/settings" title="Configuración">
            <ProfileSettings/>
        </ProtectedLayout>
    }
}
