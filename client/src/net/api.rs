//! Typed helpers for the backend REST endpoints.
//!
//! Every helper goes through [`session::ApiClient`], so the bearer token and
//! the 401/402 handling apply uniformly. Helpers are generic over the
//! transport; the app uses [`BrowserTransport`], tests a scripted fake.
//!
//! ERROR HANDLING
//! ==============
//! Helpers return [`ApiError`]; pages render `user_message()` next to the
//! affected view. Session expiry and inactive subscriptions have already
//! been handled globally by the time a page sees them.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use serde_json::{Value, json};
use session::{ApiClient, ApiError, ConfigError, SessionContext, Transport, gateway};

use super::transport::BrowserTransport;
use super::types::{
    CompanyIncome, Empresa, EmpresaForm, IncomeTotal, LatestSubscription, Lectura, Locker, MonthlyIncome,
    MonthlySubscriptions, Plan, SubscriptionStatus, Suscripcion, Usuario, UsuarioForm,
};

/// Role id the backend uses for company employees.
pub const EMPLOYEE_ROLE_ID: i64 = 3;

/// Shared handle to the gateway, provided through context.
///
/// Holds the resolution error instead of a client when the backend root was
/// refused, so every request surfaces it.
#[derive(Clone)]
pub struct Backend {
    client: Arc<Result<ApiClient<BrowserTransport>, ConfigError>>,
}

impl Backend {
    #[must_use]
    pub fn new(root: Result<session::ApiRoot, ConfigError>, context: SessionContext) -> Self {
        let client = root.map(|root| ApiClient::new(root, context, BrowserTransport));
        Self { client: Arc::new(client) }
    }

    /// The gateway client.
    ///
    /// # Errors
    ///
    /// [`ApiError::Config`] when the backend root could not be resolved.
    pub fn client(&self) -> Result<&ApiClient<BrowserTransport>, ApiError> {
        match &*self.client {
            Ok(client) => Ok(client),
            Err(err) => Err(ApiError::Config(err.clone())),
        }
    }
}

/// `POST /usuarios/login`, returning the session token.
///
/// # Errors
///
/// Gateway errors, or [`ApiError::MissingToken`].
pub async fn login<T: Transport>(api: &ApiClient<T>, correo: &str, contrasena: &str) -> Result<String, ApiError> {
    let body = api.post("/usuarios/login", json!({ "correo": correo, "contraseña": contrasena })).await?;
    gateway::login_token(&body)
}

/// `POST /usuarios/google-login` with a Google ID credential.
///
/// # Errors
///
/// Gateway errors, or [`ApiError::MissingToken`].
pub async fn google_login<T: Transport>(api: &ApiClient<T>, credential: &str) -> Result<String, ApiError> {
    let body = api.post("/usuarios/google-login", json!({ "token": credential })).await?;
    gateway::login_token(&body)
}

/// `POST /usuarios/logout`. Best effort: failures are logged and ignored.
pub async fn logout<T: Transport>(api: &ApiClient<T>) {
    if let Err(e) = api.post("/usuarios/logout", json!({})).await {
        tracing::warn!(error = %e, "backend logout failed");
    }
}

/// `GET /empresas`
///
/// # Errors
///
/// Gateway errors.
pub async fn fetch_empresas<T: Transport>(api: &ApiClient<T>) -> Result<Vec<Empresa>, ApiError> {
    api.get_list("/empresas").await
}

/// `POST /empresas`
///
/// # Errors
///
/// Gateway errors.
pub async fn create_empresa<T: Transport>(api: &ApiClient<T>, form: &EmpresaForm) -> Result<Value, ApiError> {
    api.post("/empresas", to_body(form)?).await
}

/// `GET /usuarios/admin`: company administrators, for the SuperAdmin views.
///
/// # Errors
///
/// Gateway errors.
pub async fn fetch_admin_users<T: Transport>(api: &ApiClient<T>) -> Result<Vec<Usuario>, ApiError> {
    api.get_list("/usuarios/admin").await
}

/// `GET /usuarios?rol_id=3&empresa_id=`: employees of one company.
///
/// # Errors
///
/// Gateway errors.
pub async fn fetch_employees<T: Transport>(api: &ApiClient<T>, empresa_id: i64) -> Result<Vec<Usuario>, ApiError> {
    let query = [("rol_id", EMPLOYEE_ROLE_ID.to_string()), ("empresa_id", empresa_id.to_string())];
    let value = api.get_with_query("/usuarios", &query).await?;
    session::gateway::decode_list(value)
}

/// `GET /usuarios/{id}`
///
/// # Errors
///
/// Gateway errors.
pub async fn fetch_usuario<T: Transport>(api: &ApiClient<T>, id: &str) -> Result<Usuario, ApiError> {
    api.get_json(&format!("/usuarios/{id}")).await
}

/// `POST /usuarios`
///
/// # Errors
///
/// Gateway errors.
pub async fn create_usuario<T: Transport>(api: &ApiClient<T>, form: &UsuarioForm) -> Result<Value, ApiError> {
    api.post("/usuarios", to_body(form)?).await
}

/// `PUT /usuarios/{id}`
///
/// # Errors
///
/// Gateway errors.
pub async fn update_usuario<T: Transport>(api: &ApiClient<T>, id: &str, form: &UsuarioForm) -> Result<Value, ApiError> {
    api.put(&format!("/usuarios/{id}"), to_body(form)?).await
}

/// `DELETE /usuarios/{id}`
///
/// # Errors
///
/// Gateway errors.
pub async fn delete_usuario<T: Transport>(api: &ApiClient<T>, id: i64) -> Result<(), ApiError> {
    api.delete(&format!("/usuarios/{id}")).await.map(|_| ())
}

/// `GET /lockers`
///
/// # Errors
///
/// Gateway errors.
pub async fn fetch_lockers<T: Transport>(api: &ApiClient<T>) -> Result<Vec<Locker>, ApiError> {
    api.get_list("/lockers").await
}

/// `GET /lockers/empresa/{id}`
///
/// # Errors
///
/// Gateway errors.
pub async fn fetch_company_lockers<T: Transport>(api: &ApiClient<T>, empresa_id: i64) -> Result<Vec<Locker>, ApiError> {
    api.get_list(&format!("/lockers/empresa/{empresa_id}")).await
}

/// `PUT /lockers/{id}` assigning the locker to a user (or unassigning).
///
/// # Errors
///
/// Gateway errors.
pub async fn assign_locker<T: Transport>(
    api: &ApiClient<T>,
    locker_id: i64,
    usuario_id: Option<i64>,
) -> Result<Value, ApiError> {
    api.put(&format!("/lockers/{locker_id}"), json!({ "usuario_id": usuario_id })).await
}

/// `GET /suscripciones`
///
/// # Errors
///
/// Gateway errors.
pub async fn fetch_suscripciones<T: Transport>(api: &ApiClient<T>) -> Result<Vec<Suscripcion>, ApiError> {
    api.get_list("/suscripciones").await
}

/// `GET /suscripciones/status?empresa_id=`
///
/// # Errors
///
/// Gateway errors.
pub async fn subscription_status<T: Transport>(
    api: &ApiClient<T>,
    empresa_id: i64,
) -> Result<SubscriptionStatus, ApiError> {
    let value = api.get_with_query("/suscripciones/status", &[("empresa_id", empresa_id.to_string())]).await?;
    if value.is_null() {
        return Ok(SubscriptionStatus::default());
    }
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// `PUT /suscripciones/{id}` with `estado: cancelada`.
///
/// # Errors
///
/// Gateway errors.
pub async fn cancel_suscripcion<T: Transport>(api: &ApiClient<T>, id: i64) -> Result<Value, ApiError> {
    api.put(&format!("/suscripciones/{id}"), json!({ "estado": "cancelada" })).await
}

/// `GET /planes`
///
/// # Errors
///
/// Gateway errors.
pub async fn fetch_planes<T: Transport>(api: &ApiClient<T>) -> Result<Vec<Plan>, ApiError> {
    api.get_list("/planes").await
}

/// `GET /temperaturas/latest-all`
///
/// # Errors
///
/// Gateway errors.
pub async fn latest_readings<T: Transport>(api: &ApiClient<T>) -> Result<Vec<Lectura>, ApiError> {
    api.get_list("/temperaturas/latest-all").await
}

/// `GET /reports/ingresos/totales`
///
/// # Errors
///
/// Gateway errors.
pub async fn total_income<T: Transport>(api: &ApiClient<T>) -> Result<f64, ApiError> {
    let total: IncomeTotal = api.get_json("/reports/ingresos/totales").await?;
    Ok(total.ingresos_totales.unwrap_or(0.0))
}

/// `GET /reports/ingresos/totales-por-fecha` for an inclusive `YYYY-MM-DD` range.
///
/// # Errors
///
/// Gateway errors.
pub async fn income_total_between<T: Transport>(
    api: &ApiClient<T>,
    fecha_inicio: &str,
    fecha_fin: &str,
) -> Result<f64, ApiError> {
    let value = api.get_with_query("/reports/ingresos/totales-por-fecha", &range_query(fecha_inicio, fecha_fin)).await?;
    if value.is_null() {
        return Ok(0.0);
    }
    let total: IncomeTotal = serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(total.ingresos_totales.unwrap_or(0.0))
}

/// `GET /reports/ingresos/por-empresa` for an inclusive `YYYY-MM-DD` range.
///
/// # Errors
///
/// Gateway errors.
pub async fn incomes_by_company<T: Transport>(
    api: &ApiClient<T>,
    fecha_inicio: &str,
    fecha_fin: &str,
) -> Result<Vec<CompanyIncome>, ApiError> {
    let value = api.get_with_query("/reports/ingresos/por-empresa", &range_query(fecha_inicio, fecha_fin)).await?;
    session::gateway::decode_list(value)
}

/// `GET /reports/ingresos/mensuales`
///
/// # Errors
///
/// Gateway errors.
pub async fn monthly_income<T: Transport>(api: &ApiClient<T>) -> Result<Vec<MonthlyIncome>, ApiError> {
    api.get_list("/reports/ingresos/mensuales").await
}

/// `GET /suscripciones/ultimas`
///
/// # Errors
///
/// Gateway errors.
pub async fn latest_subscriptions<T: Transport>(api: &ApiClient<T>) -> Result<Vec<LatestSubscription>, ApiError> {
    api.get_list("/suscripciones/ultimas").await
}

/// `GET /suscripciones/mensuales`
///
/// # Errors
///
/// Gateway errors.
pub async fn monthly_subscriptions<T: Transport>(api: &ApiClient<T>) -> Result<Vec<MonthlySubscriptions>, ApiError> {
    api.get_list("/suscripciones/mensuales").await
}

/// The company's active subscription, if the status endpoint says one exists
/// and the subscription list contains it.
///
/// # Errors
///
/// Gateway errors.
pub async fn active_subscription<T: Transport>(
    api: &ApiClient<T>,
    empresa_id: i64,
) -> Result<Option<Suscripcion>, ApiError> {
    if !subscription_status(api, empresa_id).await?.activa {
        return Ok(None);
    }
    let all = fetch_suscripciones(api).await?;
    Ok(all.into_iter().find(|s| s.empresa_id == Some(empresa_id) && s.is_active()))
}

fn range_query(fecha_inicio: &str, fecha_fin: &str) -> [(&'static str, String); 2] {
    [("fecha_inicio", fecha_inicio.to_owned()), ("fecha_fin", fecha_fin.to_owned())]
}

fn to_body<S: serde::Serialize>(form: &S) -> Result<Value, ApiError> {
    serde_json::to_value(form).map_err(|e| ApiError::Decode(e.to_string()))
}
