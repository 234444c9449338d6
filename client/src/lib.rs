//! # client
//!
//! Leptos + WASM front end for the Bodegix locker administration console.
//!
//! This crate contains the app shell and route table, role-gated pages for
//! the SuperAdmin and Client areas, the browser bindings for the `session`
//! crate (localStorage store, `gloo-net` transport, navigator, notifier), and
//! typed helpers for the backend REST endpoints.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    tracing::info!("hydrating bodegix client");
    leptos::mount::hydrate_body(app::App);
}
