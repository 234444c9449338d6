//! Single egress point for backend calls.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every REST call goes through [`ApiClient`]. The request phase attaches the
//! stored bearer token; the response phase applies the session protocol to
//! every endpoint uniformly:
//!
//! - `401` clears the session once, shows one notice, and sends the user to
//!   the login view. No retry.
//! - `402` shows one notice and sends the user to subscription management.
//!   The session is kept.
//! - anything else is returned to the caller unchanged.
//!
//! The HTTP stack is behind [`Transport`] so the same protocol runs over
//! `gloo-net` in the browser, `reqwest` natively, and a scripted fake in tests.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{ApiRoot, ConfigError};
use crate::context::{Notice, SessionContext};

const NETWORK_ERROR_TEXT: &str = "Error de red";

/// HTTP method subset used by the front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Fully resolved outbound request handed to a [`Transport`].
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL including the `/api` root.
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Value of the `Authorization` header, if attached.
    #[must_use]
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("authorization"))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response: status code and body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Failure below HTTP (DNS, connection reset, CORS, ...).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// HTTP stack seam.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Errors surfaced to call sites.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// 401. Already handled globally; callers may show their own state.
    #[error("session expired: {message}")]
    Unauthorized { message: String },
    /// 402. Already handled globally.
    #[error("subscription required: {message}")]
    SubscriptionRequired { message: String },
    /// Any other non-success status.
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
    /// Login succeeded at HTTP level but carried no `usuario.token`.
    #[error("no token received in login response")]
    MissingToken,
    /// The backend root could not be resolved for this page.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Best human-readable message for display next to a form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized { message } | Self::SubscriptionRequired { message } | Self::Status { message, .. } => {
                message.clone()
            }
            Self::Transport(_) => NETWORK_ERROR_TEXT.to_owned(),
            Self::Decode(_) => "Respuesta inválida del servidor.".to_owned(),
            Self::MissingToken => "No se recibió token en la respuesta.".to_owned(),
            Self::Config(err) => err.to_string(),
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::SubscriptionRequired { .. } => Some(402),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err.0)
    }
}

/// The gateway: token attachment plus the 401/402 protocol.
pub struct ApiClient<T> {
    root: ApiRoot,
    context: SessionContext,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    #[must_use]
    pub fn new(root: ApiRoot, context: SessionContext, transport: T) -> Self {
        Self { root, context, transport }
    }

    #[must_use]
    pub fn root(&self) -> &ApiRoot {
        &self.root
    }

    #[must_use]
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request and return its JSON body (`Null` when empty).
    ///
    /// # Errors
    ///
    /// See [`ApiError`]. 401 and 402 have already triggered the global
    /// handling by the time they are returned.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let request = self.prepare(method, path, query, body);
        tracing::debug!(method = method.as_str(), url = %request.url, "api request");
        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(error = %e, path, "api transport failure");
            ApiError::from(e)
        })?;
        self.handle_response(path, response)
    }

    /// `GET path`
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::Get, path, &[], None).await
    }

    /// `GET path?query`
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn get_with_query(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        self.request(Method::Get, path, query, None).await
    }

    /// `GET path`, decoded into `R`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Decode`] if the body does not match `R`; otherwise see
    /// [`Self::request`].
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let value = self.get(path).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// `GET path` for list endpoints, accepting `[...]` or `{ "data": [...] }`.
    ///
    /// # Errors
    ///
    /// See [`Self::get_json`].
    pub async fn get_list<R: DeserializeOwned>(&self, path: &str) -> Result<Vec<R>, ApiError> {
        let value = self.get(path).await?;
        decode_list(value)
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.request(Method::Post, path, &[], Some(body)).await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn put(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.request(Method::Put, path, &[], Some(body)).await
    }

    /// `DELETE path`
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::Delete, path, &[], None).await
    }

    /// Request phase: resolve the URL and attach the stored bearer token.
    ///
    /// Reads the store directly so it works before the auth manager has
    /// initialized.
    fn prepare(&self, method: Method, path: &str, query: &[(&str, String)], body: Option<Value>) -> ApiRequest {
        let mut headers = Vec::new();
        if let Some(token) = self.context.token() {
            headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
        if body.is_some() {
            headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
        }
        ApiRequest {
            method,
            url: self.root.join(path),
            query: query.iter().map(|(k, v)| ((*k).to_owned(), v.clone())).collect(),
            headers,
            body,
        }
    }

    /// Response phase.
    fn handle_response(&self, path: &str, response: ApiResponse) -> Result<Value, ApiError> {
        let status = response.status;
        if (200..300).contains(&status) {
            return parse_body(&response.body);
        }

        let server_message = error_message(&response.body);
        match status {
            401 => {
                self.context.expire_session();
                Err(ApiError::Unauthorized {
                    message: server_message.unwrap_or_else(|| Notice::SessionExpired.text().to_owned()),
                })
            }
            402 => {
                let notice = Notice::SubscriptionInactive { message: server_message };
                let message = notice.text().to_owned();
                self.context.require_subscription(notice);
                Err(ApiError::SubscriptionRequired { message })
            }
            _ => {
                tracing::debug!(status, path, "api request failed");
                Err(ApiError::Status { status, message: server_message.unwrap_or_else(|| NETWORK_ERROR_TEXT.to_owned()) })
            }
        }
    }
}

/// Pull `message`, else `error`, out of a JSON error body.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty()))
        .map(str::to_owned)
}

/// Pull `usuario.token` out of a `POST /usuarios/login` response.
///
/// # Errors
///
/// [`ApiError::MissingToken`] if absent or blank.
pub fn login_token(body: &Value) -> Result<String, ApiError> {
    body.pointer("/usuario/token")
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .map(str::to_owned)
        .ok_or(ApiError::MissingToken)
}

/// Decode a list endpoint body: either a bare array or `{ "data": [...] }`.
/// Anything else is an empty list.
///
/// # Errors
///
/// [`ApiError::Decode`] if an element does not match `R`.
pub fn decode_list<R: DeserializeOwned>(value: Value) -> Result<Vec<R>, ApiError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(|e| ApiError::Decode(e.to_string())))
        .collect()
}

fn parse_body(body: &str) -> Result<Value, ApiError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}
