//! Conditional visibility - `<dot-path> === '<literal>'`
//!
//! This is the only supported condition shape. Anything that does not parse
//! counts as satisfied, so a broken condition shows its block instead of
//! hiding it. The same default applies on every render path.

use crate::{parse_path, resolve_path, template::strip_quotes, ExprError, Result};
use regex_lite::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Outcome used for absent, blank, or unparseable conditions
pub const DEFAULT_VISIBILITY: bool = true;

fn condition_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r#"^\s*([^\s=!<>'"()]+)\s*===\s*(.*?)\s*$"#).ok())
        .as_ref()
}

/// A parsed equality condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub path: String,
    pub literal: String,
}

impl Condition {
    /// Parse `path === 'literal'`.
    ///
    /// The literal may be single- or double-quoted, or a bare token without
    /// whitespace.
    pub fn parse(source: &str) -> Result<Condition> {
        if source.trim().is_empty() {
            return Err(ExprError::Empty);
        }

        let unsupported = || ExprError::UnsupportedCondition(source.to_string());
        let pattern = condition_pattern().ok_or_else(unsupported)?;
        let caps = pattern.captures(source).ok_or_else(unsupported)?;

        let path = caps.get(1).map(|m| m.as_str()).ok_or_else(unsupported)?;
        let right = caps.get(2).map(|m| m.as_str()).ok_or_else(unsupported)?;
        parse_path(path)?;

        let literal = match strip_quotes(right) {
            Some(inner) => inner,
            None if !right.is_empty() && !right.contains(char::is_whitespace) && !right.contains(['\'', '"']) => right,
            None => return Err(unsupported()),
        };

        Ok(Condition {
            path: path.to_string(),
            literal: literal.to_string(),
        })
    }

    /// String equality between the resolved path and the literal
    pub fn evaluate(&self, data: &Value) -> bool {
        resolve_path(data, &self.path) == self.literal
    }
}

/// Evaluate a condition, treating parse failures as satisfied
pub fn evaluate_condition(source: &str, data: &Value) -> bool {
    match Condition::parse(source) {
        Ok(condition) => condition.evaluate(data),
        Err(err) => {
            tracing::debug!(condition = source, error = %err, "unparseable condition, block stays visible");
            DEFAULT_VISIBILITY
        }
    }
}

/// Visibility of a block given its optional `visibleIf`
pub fn is_visible(visible_if: Option<&str>, data: &Value) -> bool {
    match visible_if {
        Some(source) if !source.trim().is_empty() => evaluate_condition(source, data),
        _ => DEFAULT_VISIBILITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equality_condition() {
        let data = json!({"order": {"status": "paid"}});
        assert!(evaluate_condition("order.status === 'paid'", &data));
        assert!(!evaluate_condition("order.status === 'open'", &data));
        assert!(evaluate_condition("order.status===\"paid\"", &data));
    }

    #[test]
    fn test_values_compare_as_strings() {
        let data = json!({"count": 3, "flag": true});
        assert!(evaluate_condition("count === '3'", &data));
        assert!(evaluate_condition("flag === true", &data));
        assert!(evaluate_condition("missing === ''", &data));
    }

    #[test]
    fn test_unsupported_shapes_default_to_visible() {
        let data = json!({"a": "x"});
        assert!(evaluate_condition("a == 'y'", &data));
        assert!(evaluate_condition("a !== 'x'", &data));
        assert!(evaluate_condition("a === 'y' && a === 'x'", &data));
        assert!(evaluate_condition("(a) === 'y'", &data));
        assert!(evaluate_condition("garbage", &data));
    }

    #[test]
    fn test_absent_or_blank_condition_is_visible() {
        let data = json!({});
        assert!(is_visible(None, &data));
        assert!(is_visible(Some("   "), &data));
        assert!(!is_visible(Some("a === 'b'"), &data));
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            Condition::parse(" kind === 'outdoor' "),
            Ok(Condition {
                path: "kind".into(),
                literal: "outdoor".into()
            })
        );
        assert!(matches!(Condition::parse("kind === 'a b"), Err(ExprError::UnsupportedCondition(_))));
        assert_eq!(Condition::parse(""), Err(ExprError::Empty));
    }
}
