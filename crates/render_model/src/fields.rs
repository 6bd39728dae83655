//! Display formatting for bound field values

use doc_model::DateTimeMode;
use expr_engine::{value_to_string, Helper};
use serde_json::Value;

/// Format a number field value.
///
/// Numbers (and numeric strings) are rounded to `decimals` places when set.
/// Anything else is shown as its plain string. The unit is appended after
/// a space when the value is not empty.
pub fn format_number(value: &Value, decimals: Option<u8>, unit: Option<&str>) -> String {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    let text = match (number, decimals) {
        (Some(n), Some(places)) if n.is_finite() => format!("{:.*}", usize::from(places), n),
        _ => value_to_string(value),
    };

    match unit.map(str::trim).filter(|u| !u.is_empty()) {
        Some(unit) if !text.is_empty() => format!("{text} {unit}"),
        _ => text,
    }
}

/// Format a date/time field value through the matching expression helper.
/// Values that are not timestamps are shown as given.
pub fn format_date_time(value: &Value, mode: DateTimeMode) -> String {
    let raw = value_to_string(value);
    if raw.is_empty() {
        return raw;
    }

    let helper = match mode {
        DateTimeMode::Date => Helper::FormatDate,
        DateTimeMode::Time => Helper::FormatTime,
        DateTimeMode::DateTime => Helper::FormatDateTime,
    };
    match helper.apply(&raw) {
        Ok(formatted) => formatted,
        Err(err) => {
            tracing::debug!(value = %raw, error = %err, "date field shown unformatted");
            raw
        }
    }
}
