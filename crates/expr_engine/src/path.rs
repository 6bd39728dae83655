//! Dot-path resolution over a nested JSON mapping

use crate::{ExprError, Result};
use serde_json::Value;

/// Split a dot-path into segments, rejecting empty ones
pub fn parse_path(path: &str) -> Result<Vec<&str>> {
    let path = path.trim();
    if path.is_empty() {
        return Err(ExprError::Empty);
    }

    let segments: Vec<&str> = path.split('.').map(str::trim).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(ExprError::InvalidPath(path.to_string()));
    }
    Ok(segments)
}

/// Walk `path` segment by segment through nested objects.
///
/// Stops with `None` as soon as a segment is absent or the current value is
/// not an object. Arrays are not indexable.
pub fn lookup<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    let segments = parse_path(path).ok()?;
    let mut current = data;

    for segment in segments {
        match current {
            Value::Object(map) => current = map.get(segment)?,
            _ => return None,
        }
    }

    Some(current)
}

/// Resolve a path to display text; anything unresolvable becomes `""`
pub fn resolve_path(data: &Value, path: &str) -> String {
    lookup(data, path).map(value_to_string).unwrap_or_default()
}

/// Text form of a scalar. Objects, arrays and null have no text form.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64().unwrap_or_default();
                // Format integral floats without decimal places
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    format!("{}", f as i64)
                } else {
                    format!("{}", f)
                }
            }
        }
        Value::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        Value::Null | Value::Object(_) | Value::Array(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolves_nested_value() {
        let data = json!({"a": {"b": 5}});
        assert_eq!(resolve_path(&data, "a.b"), "5");
    }

    #[test]
    fn test_missing_segment_is_empty() {
        let data = json!({"a": {"b": 5}});
        assert_eq!(resolve_path(&data, "a.c"), "");
    }

    #[test]
    fn test_walking_into_scalar_is_empty() {
        let data = json!({"a": {"b": 5}});
        assert_eq!(resolve_path(&data, "a.b.c"), "");
    }

    #[test]
    fn test_arrays_are_not_mappings() {
        let data = json!({"items": [{"name": "x"}]});
        assert_eq!(resolve_path(&data, "items.0.name"), "");
    }

    #[test]
    fn test_malformed_paths() {
        let data = json!({"a": 1});
        assert_eq!(resolve_path(&data, ""), "");
        assert_eq!(resolve_path(&data, "a..b"), "");
        assert_eq!(resolve_path(&data, "."), "");
        assert_eq!(parse_path("  "), Err(ExprError::Empty));
    }

    #[test]
    fn test_whitespace_around_segments() {
        let data = json!({"a": {"b": "ok"}});
        assert_eq!(resolve_path(&data, " a . b "), "ok");
    }

    #[test]
    fn test_scalar_formatting() {
        assert_eq!(value_to_string(&json!(2.5)), "2.5");
        assert_eq!(value_to_string(&json!(3.0)), "3");
        assert_eq!(value_to_string(&json!(-7)), "-7");
        assert_eq!(value_to_string(&json!(true)), "true");
        assert_eq!(value_to_string(&json!(null)), "");
        assert_eq!(value_to_string(&json!({"x": 1})), "");
    }
}
