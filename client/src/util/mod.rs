//! Shared helpers for pages and components.

pub mod auth;
pub mod format;
pub mod monitoring;
