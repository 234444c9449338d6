//! SuperAdmin area (`/admin/*`).

pub mod charts;
pub mod dashboard;
pub mod register_company;
pub mod reports;
pub mod settings;
pub mod users;
