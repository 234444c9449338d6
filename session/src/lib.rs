//! Session, identity, and route authorization for the Bodegix admin front end.
//!
//! This crate owns everything that decides *who* the current user is and
//! *where* they may go: the persisted bearer token, the unverified token
//! decoder, the in-memory auth state, the route guard, and the single API
//! gateway that attaches the token and reacts to session invalidation.
//!
//! ARCHITECTURE
//! ============
//! Process-wide state lives in a constructed [`SessionContext`] (store,
//! notice flags, navigator, notifier) that is handed to both the
//! [`AuthManager`] and the [`ApiClient`]. Nothing here touches a browser
//! global directly except [`store::LocalStorageStore`] (feature `web`), so
//! the whole crate is testable natively.

pub mod auth;
pub mod config;
pub mod context;
pub mod gateway;
pub mod guard;
pub mod role;
pub mod routes;
pub mod store;
pub mod token;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use auth::{AuthError, AuthManager, AuthState, Profile};
pub use config::{ApiRoot, ConfigError};
pub use context::{NavigationCommand, NavigationReason, Navigator, Notice, Notifier, SessionContext};
pub use gateway::{ApiClient, ApiError, ApiRequest, ApiResponse, Method, Transport, TransportError};
pub use guard::GuardDecision;
pub use role::{AllowedRoles, Role, RoleRef};
pub use store::{MemoryStore, SessionStore};
pub use token::{Identity, MalformedTokenError};
