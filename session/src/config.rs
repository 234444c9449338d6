//! Backend root resolution for the API gateway.
//!
//! Resolution order:
//! 1. explicit configuration (`BODEGIX_API_URL`, baked in at build time for
//!    the browser bundle, read from the environment natively)
//! 2. the production host when running from a deployed origin
//! 3. the local development server
//!
//! A deployed origin that resolves to a localhost target is refused, so a
//! misconfigured build cannot ship pointing at a developer machine.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::fmt;

pub const API_URL_ENV: &str = "BODEGIX_API_URL";
pub const PRODUCTION_HOST: &str = "https://backend-bodegix.onrender.com";
pub const DEVELOPMENT_HOST: &str = "http://localhost:5000";

const LOCAL_ORIGIN_PREFIXES: &[&str] = &["http://localhost", "http://127.0.0.1", "chrome-extension://"];
const LOCAL_TARGET_MARKERS: &[&str] = &["localhost", "127.0.0.1"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("API base URL points at a local machine in production: {url}")]
    LocalTargetInProduction { url: String },
}

/// Normalized backend API root, always ending in `/api`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRoot(String);

impl ApiRoot {
    /// Resolve the API root for a page served from `origin`.
    ///
    /// `origin` is `None` outside a browser, which counts as local.
    ///
    /// # Errors
    ///
    /// [`ConfigError::LocalTargetInProduction`] when `origin` is deployed and
    /// the resolved root targets localhost.
    pub fn resolve(explicit: Option<&str>, origin: Option<&str>) -> Result<Self, ConfigError> {
        let deployed = origin.is_some_and(is_deployed_origin);
        let raw = match explicit.map(str::trim).filter(|s| !s.is_empty()) {
            Some(url) => url,
            None if deployed => PRODUCTION_HOST,
            None => DEVELOPMENT_HOST,
        };

        let root = Self(normalize(raw));
        if deployed && root.is_local() {
            tracing::error!(url = %root, "refusing local API target from a deployed origin");
            return Err(ConfigError::LocalTargetInProduction { url: root.0 });
        }
        Ok(root)
    }

    /// Resolve from the process environment for native callers.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`]; native callers never count as deployed, so
    /// this only fails if that changes.
    pub fn from_env() -> Result<Self, ConfigError> {
        let explicit = std::env::var(API_URL_ENV).ok();
        Self::resolve(explicit.as_deref(), None)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Join an endpoint path onto the root.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }

    fn is_local(&self) -> bool {
        let lower = self.0.to_ascii_lowercase();
        LOCAL_TARGET_MARKERS.iter().any(|m| lower.contains(m))
    }
}

impl fmt::Display for ApiRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A page origin is deployed unless it is a local dev server or extension.
#[must_use]
pub fn is_deployed_origin(origin: &str) -> bool {
    let lower = origin.trim().to_ascii_lowercase();
    !LOCAL_ORIGIN_PREFIXES.iter().any(|p| lower.starts_with(p))
}

fn normalize(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.ends_with("/api") {
        trimmed.to_owned()
    } else {
        format!("{trimmed}/api")
    }
}
