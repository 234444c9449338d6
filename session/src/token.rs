//! Structural decoding of session tokens into a user identity.
//!
//! SECURITY
//! ========
//! Decoding here performs **no signature verification**. A decoded
//! [`Identity`] only means the token is structurally well formed; the
//! backend re-validates the signature on every request, and only a
//! successful API call establishes trust. Do not use the decoded claims for
//! anything beyond choosing which screens to show.
//!
//! DESIGN
//! ======
//! Claim names vary by backend endpoint (`rol` vs `rol_id` vs `rol_nombre`,
//! `empresa_id` vs `empresa_nombre`, ...). Each logical field therefore has an
//! explicit ordered alias list, resolved by first match.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::role::Role;

const SUBJECT_KEYS: &[&str] = &["sub", "id", "usuario_id"];
const ROLE_NAME_KEYS: &[&str] = &["rol_nombre", "rol", "role"];
const ROLE_ID_KEYS: &[&str] = &["rol_id", "role_id", "rol"];
const COMPANY_ID_KEYS: &[&str] = &["empresa_id", "company_id"];
const COMPANY_NAME_KEYS: &[&str] = &["empresa_nombre", "empresa"];
const DISPLAY_NAME_KEYS: &[&str] = &["nombre", "name"];

/// Error returned by [`decode`] when a token is not structurally valid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedTokenError {
    /// The token does not have exactly three dot-separated segments.
    #[error("expected 3 token segments, found {0}")]
    SegmentCount(usize),
    /// The payload segment is not valid base64url.
    #[error("token payload is not valid base64url: {0}")]
    Base64(String),
    /// The payload decoded but is not a JSON object.
    #[error("token payload is not a JSON object: {0}")]
    Json(String),
    /// No subject identifier could be resolved from the payload.
    #[error("token payload has no subject identifier")]
    MissingSubject,
}

/// Claims decoded from a session token. Unverified; see the module docs.
///
/// Never persisted on its own: it is always re-derived from the stored token
/// and discarded together with it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Identity {
    /// User identifier (`sub` / `id`).
    pub subject_id: String,
    /// Role name as issued (`"superadmin"`, `"cliente"`, ...), if present.
    pub role_name: Option<String>,
    /// Numeric role id, if present.
    pub role_id: Option<i64>,
    /// Company the user belongs to, if any.
    pub company_id: Option<i64>,
    /// Company display name, if the token carries one.
    pub company_name: Option<String>,
    /// User display name.
    pub display_name: Option<String>,
}

impl Identity {
    /// Canonical role, preferring the numeric id over the name.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role_id
            .and_then(Role::from_id)
            .or_else(|| self.role_name.as_deref().and_then(Role::from_name))
    }
}

/// Decode a token's payload segment into an [`Identity`].
///
/// # Errors
///
/// Returns [`MalformedTokenError`] when the token does not split into three
/// segments, the payload is not base64url, the payload is not a JSON object,
/// or no subject id is present. A failure never yields a partial identity.
pub fn decode(token: &str) -> Result<Identity, MalformedTokenError> {
    let claims = decode_claims(token)?;
    identity_from_claims(&claims)
}

/// Decode the raw JSON claims of a token without mapping aliases.
///
/// # Errors
///
/// Same structural failures as [`decode`], minus the subject check.
pub fn decode_claims(token: &str) -> Result<Map<String, Value>, MalformedTokenError> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    if segments.len() != 3 {
        return Err(MalformedTokenError::SegmentCount(segments.len()));
    }

    // Some issuers pad base64url; the no-pad engine rejects `=`.
    let payload = segments[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| MalformedTokenError::Base64(e.to_string()))?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(MalformedTokenError::Json(format!("found {}", json_kind(&other)))),
        Err(e) => Err(MalformedTokenError::Json(e.to_string())),
    }
}

fn identity_from_claims(claims: &Map<String, Value>) -> Result<Identity, MalformedTokenError> {
    let subject_id = first_match(claims, SUBJECT_KEYS, id_string).ok_or(MalformedTokenError::MissingSubject)?;

    Ok(Identity {
        subject_id,
        role_name: first_match(claims, ROLE_NAME_KEYS, text),
        role_id: first_match(claims, ROLE_ID_KEYS, integer),
        company_id: first_match(claims, COMPANY_ID_KEYS, integer),
        company_name: first_match(claims, COMPANY_NAME_KEYS, label),
        display_name: first_match(claims, DISPLAY_NAME_KEYS, label),
    })
}

/// Resolve the first alias whose value passes `extract`.
fn first_match<T>(claims: &Map<String, Value>, keys: &[&str], extract: fn(&Value) -> Option<T>) -> Option<T> {
    keys.iter().find_map(|key| claims.get(*key).and_then(extract))
}

fn text(value: &Value) -> Option<String> {
    let s = value.as_str()?.trim();
    // `rol` doubles as a numeric alias; a number-like string is not a name.
    if s.is_empty() || s.parse::<i64>().is_ok() {
        return None;
    }
    Some(s.to_owned())
}

/// Free-form display text; digits are a valid name here.
fn label(value: &Value) -> Option<String> {
    let s = value.as_str()?.trim();
    (!s.is_empty()).then(|| s.to_owned())
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
