//! Reusable view components.
//!
//! ARCHITECTURE
//! ============
//! `layout` applies the route guard and frames every protected page with
//! the `sidebar` and `topbar`; `status` holds the small loading/error/KPI
//! pieces pages share; `profile_settings` backs both settings pages.

pub mod layout;
pub mod profile_settings;
pub mod sidebar;
pub mod status;
pub mod topbar;
