//! Backend REST payloads.
//!
//! DESIGN
//! ======
//! The backend mixes numeric and string ids and omits optional columns
//! freely, so every field except the id is optional and ids accept either
//! representation. Unknown fields are ignored.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A tenant company.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Empresa {
    #[serde(deserialize_with = "id_from_any")]
    pub id: i64,
    #[serde(default, alias = "name", alias = "razon_social")]
    pub nombre: String,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
}

/// A backend user account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Usuario {
    #[serde(deserialize_with = "id_from_any")]
    pub id: i64,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub correo: String,
    #[serde(default, deserialize_with = "opt_id_from_any")]
    pub rol_id: Option<i64>,
    #[serde(default, deserialize_with = "opt_id_from_any")]
    pub empresa_id: Option<i64>,
    #[serde(default)]
    pub empresa: Option<String>,
}

/// A physical locker and its sensor thresholds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Locker {
    #[serde(deserialize_with = "id_from_any")]
    pub id: i64,
    #[serde(default, deserialize_with = "opt_text_from_any")]
    pub identificador: Option<String>,
    #[serde(default)]
    pub ubicacion: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default, deserialize_with = "opt_id_from_any")]
    pub empresa_id: Option<i64>,
    #[serde(default, deserialize_with = "opt_id_from_any")]
    pub usuario_id: Option<i64>,
    #[serde(default)]
    pub temp_min: Option<f64>,
    #[serde(default)]
    pub temp_max: Option<f64>,
    #[serde(default)]
    pub hum_min: Option<f64>,
    #[serde(default)]
    pub hum_max: Option<f64>,
    #[serde(default)]
    pub peso_max: Option<f64>,
}

impl Locker {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.estado.as_deref().is_some_and(|e| e.eq_ignore_ascii_case("activo"))
    }
}

/// A company subscription record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Suscripcion {
    #[serde(deserialize_with = "id_from_any")]
    pub id: i64,
    #[serde(default, deserialize_with = "opt_id_from_any")]
    pub empresa_id: Option<i64>,
    #[serde(default, deserialize_with = "opt_id_from_any")]
    pub plan_id: Option<i64>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub fecha_inicio: Option<String>,
    #[serde(default)]
    pub fecha_fin: Option<String>,
}

impl Suscripcion {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.estado.as_deref().is_some_and(|e| e.eq_ignore_ascii_case("activa"))
    }
}

/// `GET /suscripciones/status` response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    #[serde(default)]
    pub activa: bool,
}

/// A purchasable plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(deserialize_with = "id_from_any")]
    pub id: i64,
    #[serde(default)]
    pub nombre: String,
    #[serde(default, deserialize_with = "opt_number_from_any")]
    pub costo: Option<f64>,
    #[serde(default, deserialize_with = "opt_id_from_any")]
    pub lockers: Option<i64>,
    #[serde(default, deserialize_with = "opt_id_from_any")]
    pub limite_usuarios: Option<i64>,
}

/// Latest sensor reading for one locker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lectura {
    #[serde(default)]
    pub locker_id: Option<String>,
    #[serde(default, deserialize_with = "opt_number_from_any")]
    pub temperatura: Option<f64>,
    #[serde(default, deserialize_with = "opt_number_from_any")]
    pub humedad: Option<f64>,
    #[serde(default, deserialize_with = "opt_number_from_any")]
    pub peso: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Lectura {
    /// Reading time, preferring the sensor timestamp over the insert time.
    #[must_use]
    pub fn observed_at(&self) -> Option<&str> {
        self.timestamp.as_deref().or(self.created_at.as_deref())
    }
}

/// `GET /reports/ingresos/totales` response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeTotal {
    #[serde(default, deserialize_with = "opt_number_from_any")]
    pub ingresos_totales: Option<f64>,
}

/// One row of `GET /reports/ingresos/por-empresa`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanyIncome {
    #[serde(default, alias = "empresa_nombre")]
    pub empresa: String,
    #[serde(default, deserialize_with = "opt_number_from_any")]
    pub ingresos: Option<f64>,
}

/// One row of `GET /reports/ingresos/mensuales`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlyIncome {
    #[serde(default, deserialize_with = "opt_text_from_any")]
    pub mes: Option<String>,
    #[serde(default, deserialize_with = "opt_number_from_any")]
    pub ingresos: Option<f64>,
}

/// One row of `GET /suscripciones/ultimas`: a company's most recent
/// subscription.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatestSubscription {
    #[serde(default, deserialize_with = "opt_id_from_any")]
    pub empresa_id: Option<i64>,
    #[serde(default)]
    pub empresa_nombre: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub fecha_inicio: Option<String>,
    #[serde(default)]
    pub fecha_fin: Option<String>,
}

/// One row of `GET /suscripciones/mensuales`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlySubscriptions {
    #[serde(default, deserialize_with = "opt_id_from_any")]
    pub anio: Option<i64>,
    #[serde(default, deserialize_with = "opt_id_from_any")]
    pub mes: Option<i64>,
    #[serde(default, deserialize_with = "opt_id_from_any")]
    pub total_suscripciones: Option<i64>,
    #[serde(default, deserialize_with = "opt_number_from_any")]
    pub total_ingresos: Option<f64>,
}

impl MonthlySubscriptions {
    /// `YYYY-MM`, or `None` when either part is missing.
    #[must_use]
    pub fn period(&self) -> Option<String> {
        Some(format!("{}-{:02}", self.anio?, self.mes?))
    }
}

/// Body for `POST /usuarios` and `PUT /usuarios/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UsuarioForm {
    pub nombre: String,
    pub correo: String,
    #[serde(rename = "contraseña", skip_serializing_if = "Option::is_none")]
    pub contrasena: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rol_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empresa_id: Option<i64>,
}

/// Body for `POST /empresas`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EmpresaForm {
    pub nombre: String,
    pub direccion: String,
    pub telefono: String,
}

fn id_from_any<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    integer(&value).ok_or_else(|| D::Error::custom(format!("expected integer id, got {value}")))
}

fn opt_id_from_any<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(integer(&Value::deserialize(deserializer)?))
}

fn opt_number_from_any<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn opt_text_from_any<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
