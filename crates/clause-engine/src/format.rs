//! Display formatting for clause values.
//!
//! The dashboard shows nested maps either as a structural placeholder
//! (the collapsed default) or as a full recursive dump; the mode is a
//! per-row toggle owned by the comparison panel.

use contract_types::ClauseValue;

/// Placeholder for missing values and collapsed maps.
pub const DASH: &str = "\u{2014}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatMode {
    /// Nested maps render as `{…}`.
    #[default]
    Collapsed,
    /// Nested maps render as a recursive `key: value` dump.
    Expanded,
}

pub fn format_value(value: &ClauseValue, mode: FormatMode) -> String {
    match value {
        ClauseValue::Absent => DASH.to_string(),
        ClauseValue::Text(t) if t.is_empty() => DASH.to_string(),
        ClauseValue::Text(t) => t.clone(),
        ClauseValue::Number(n) => format_number(n),
        ClauseValue::List(items) => items
            .iter()
            .map(|item| format_value(item, mode))
            .collect::<Vec<_>>()
            .join(", "),
        ClauseValue::Map(_) if mode == FormatMode::Collapsed => "{\u{2026}}".to_string(),
        ClauseValue::Map(map) => {
            let inner = map
                .iter()
                .map(|(k, v)| format!("{}: {}", k, format_value(v, mode)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{inner}}}")
        }
    }
}

/// Integral floats print without a trailing `.0` so that a backend that
/// emits `50.0` and one that emits `50` read the same on screen.
/// Magnitudes past i64 range keep their serialized form; the cast would
/// saturate.
fn format_number(n: &serde_json::Number) -> String {
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
    if let Some(f) = n.as_f64() {
        if n.as_i64().is_none()
            && n.as_u64().is_none()
            && f.fract() == 0.0
            && f.abs() < I64_BOUND
        {
            return format!("{}", f as i64);
        }
    }
    n.to_string()
}
