//! Sensor reading freshness and locker id mapping for the monitoring view.
//!
//! The sensor store keys readings as `LOCKER_NNN` while the relational
//! backend numbers lockers plainly; these helpers bridge the two.

#[cfg(test)]
#[path = "monitoring_test.rs"]
mod monitoring_test;

use crate::net::types::{Lectura, Locker};

/// Readings older than this are reported stale.
pub const STALE_AFTER_MINUTES: f64 = 3.0;

const SENSOR_PREFIX: &str = "LOCKER_";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Freshness {
    Ok,
    Stale,
    NoData,
}

impl Freshness {
    #[must_use]
    pub fn classify(age_minutes: Option<f64>) -> Self {
        match age_minutes {
            None => Self::NoData,
            Some(m) if m > STALE_AFTER_MINUTES => Self::Stale,
            Some(_) => Self::Ok,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Stale => "DESACTUALIZADO",
            Self::NoData => "SIN DATOS",
        }
    }
}

/// Minutes between two epoch-millisecond instants; `None` if either is not
/// a number.
#[must_use]
pub fn age_minutes(observed_ms: f64, now_ms: f64) -> Option<f64> {
    (observed_ms.is_finite() && now_ms.is_finite()).then(|| (now_ms - observed_ms) / 60_000.0)
}

/// Freshness of `lectura` at the current browser time.
#[must_use]
pub fn freshness_now(lectura: &Lectura) -> Freshness {
    #[cfg(feature = "hydrate")]
    {
        let age = lectura
            .observed_at()
            .and_then(|iso| age_minutes(js_sys::Date::parse(iso), js_sys::Date::now()));
        Freshness::classify(age)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = lectura;
        Freshness::NoData
    }
}

/// `7` → `LOCKER_007`
#[must_use]
pub fn sensor_id(identificador: &str) -> String {
    format!("{SENSOR_PREFIX}{identificador:0>3}")
}

/// `LOCKER_007` → `007`; ids without the prefix pass through.
#[must_use]
pub fn display_id(sensor_id: &str) -> &str {
    let stripped = sensor_id
        .get(..SENSOR_PREFIX.len())
        .filter(|p| p.eq_ignore_ascii_case(SENSOR_PREFIX))
        .map_or(sensor_id, |_| &sensor_id[SENSOR_PREFIX.len()..]);
    if stripped.is_empty() { sensor_id } else { stripped }
}

/// Readings belonging to active lockers, sorted by sensor id.
#[must_use]
pub fn active_readings(lockers: &[Locker], lecturas: Vec<Lectura>) -> Vec<Lectura> {
    let active: Vec<String> = lockers
        .iter()
        .filter(|l| l.is_active())
        .filter_map(|l| l.identificador.as_deref().map(sensor_id))
        .collect();
    let mut readings: Vec<Lectura> = lecturas
        .into_iter()
        .filter(|r| r.locker_id.as_ref().is_some_and(|id| active.contains(id)))
        .collect();
    readings.sort_by(|a, b| a.locker_id.cmp(&b.locker_id));
    readings
}
