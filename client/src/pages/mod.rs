//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! `login` is the only public view. Everything under `admin` and `cliente`
//! renders inside `ProtectedLayout`, which applies the role guard for its
//! path before any data is requested.

pub mod admin;
pub mod cliente;
pub mod login;
