//! Networking and browser bindings.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` wraps the backend endpoints, `transport` carries gateway requests
//! over `fetch`, `browser` adapts navigation and notices to the page, and
//! `types` defines the REST payloads.

pub mod api;
pub mod browser;
pub mod transport;
pub mod types;
