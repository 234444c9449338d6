//! Display formatting.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// `1234.5` → `$1,234.50`
#[must_use]
pub fn money(amount: f64) -> String {
    let cents = format!("{:.2}", amount.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{frac}")
}

/// Sensor value with unit, or `--` when absent.
#[must_use]
pub fn reading(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "--".to_owned(), |v| format!("{v:.1} {unit}"))
}
