//! Template substitution - `{{expression}}` markers inside text
//!
//! ## Grammar
//!
//! ```text
//! expression := path | helper "(" argument ")"
//! argument   := path | "'" text "'" | '"' text '"'
//! path       := segment ("." segment)*
//! ```
//!
//! Calls are single-level: an argument cannot itself be a call. There is no
//! way to reach arbitrary code from a template.

use crate::{parse_path, resolve_path, ExprError, Helper, Result};
use serde_json::Value;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Argument of a helper call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Path(String),
    Literal(String),
}

/// A parsed marker body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Path(String),
    Call { helper: Helper, argument: Argument },
}

impl Expression {
    pub fn parse(source: &str) -> Result<Expression> {
        let source = source.trim();
        if source.is_empty() {
            return Err(ExprError::Empty);
        }

        let Some(open) = source.find('(') else {
            if source.contains(')') {
                return Err(ExprError::MalformedCall(source.to_string()));
            }
            parse_path(source)?;
            return Ok(Expression::Path(source.to_string()));
        };

        if !source.ends_with(')') {
            return Err(ExprError::MalformedCall(source.to_string()));
        }

        let name = source[..open].trim();
        if !is_identifier(name) {
            return Err(ExprError::MalformedCall(source.to_string()));
        }
        let helper = Helper::from_name(name).ok_or_else(|| ExprError::UnknownHelper(name.to_string()))?;

        let inner = source[open + 1..source.len() - 1].trim();
        let argument = parse_argument(inner).ok_or_else(|| ExprError::MalformedCall(source.to_string()))?;

        Ok(Expression::Call { helper, argument })
    }

    pub fn evaluate(&self, data: &Value) -> Result<String> {
        match self {
            Expression::Path(path) => Ok(resolve_path(data, path)),
            Expression::Call { helper, argument } => {
                let input = match argument {
                    Argument::Path(path) => resolve_path(data, path),
                    Argument::Literal(text) => text.clone(),
                };
                helper.apply(&input)
            }
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_argument(inner: &str) -> Option<Argument> {
    if let Some(literal) = strip_quotes(inner) {
        return Some(Argument::Literal(literal.to_string()));
    }
    if inner.contains(['(', ')', '\'', '"', ',']) {
        return None;
    }
    parse_path(inner).ok()?;
    Some(Argument::Path(inner.to_string()))
}

/// Strip one pair of matching single or double quotes.
///
/// The quoted text may not contain its own quote character.
pub(crate) fn strip_quotes(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'\'' || first == b'"') {
            let inner = &text[1..text.len() - 1];
            if !inner.contains(first as char) {
                return Some(inner);
            }
        }
    }
    None
}

/// Evaluate a bare expression; any failure yields `""`
pub fn evaluate_expression(source: &str, data: &Value) -> String {
    match Expression::parse(source).and_then(|e| e.evaluate(data)) {
        Ok(text) => text,
        Err(err) => {
            tracing::debug!(expression = source, error = %err, "expression evaluated to empty");
            String::new()
        }
    }
}

/// Replace every `{{expression}}` marker in `text`.
///
/// An unterminated `{{` and everything after it is kept verbatim.
pub fn substitute(text: &str, data: &Value) -> String {
    substitute_with(text, data, |value| value)
}

/// `substitute`, passing every evaluated value through `encode` first.
///
/// Text outside the markers is copied untouched.
pub fn substitute_with(text: &str, data: &Value, encode: impl Fn(String) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            break;
        };
        out.push_str(&rest[..start]);
        out.push_str(&encode(evaluate_expression(&after_open[..end], data)));
        rest = &after_open[end + CLOSE.len()..];
    }

    out.push_str(rest);
    out
}

/// Whether `text` holds at least one complete marker
pub fn has_markers(text: &str) -> bool {
    !markers(text).is_empty()
}

/// Bodies of the complete markers in `text`, trimmed, in order
pub fn markers(text: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            break;
        };
        found.push(after_open[..end].trim());
        rest = &after_open[end + CLOSE.len()..];
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_substitute_helper_call() {
        let data = json!({"data": {"due": "2024-03-05T00:00:00Z"}});
        assert_eq!(substitute("Date: {{formatDate(data.due)}}", &data), "Date: 05/03/2024");
    }

    #[test]
    fn test_substitute_paths() {
        let data = json!({"person": {"first": "Ada", "last": "Lovelace"}});
        assert_eq!(
            substitute("{{ person.first }} {{person.last}}!", &data),
            "Ada Lovelace!"
        );
    }

    #[test]
    fn test_substitute_with_encodes_values_only() {
        let data = json!({"name": "<Ada>"});
        let out = substitute_with("<b>{{name}}</b>", &data, |v| v.replace('<', "[").replace('>', "]"));
        assert_eq!(out, "<b>[Ada]</b>");
    }

    #[test]
    fn test_failures_become_empty() {
        let data = json!({"d": "not a date"});
        assert_eq!(substitute("[{{formatDate(d)}}]", &data), "[]");
        assert_eq!(substitute("[{{shout(d)}}]", &data), "[]");
        assert_eq!(substitute("[{{missing.path}}]", &data), "[]");
        assert_eq!(substitute("[{{}}]", &data), "[]");
        assert_eq!(substitute("[{{formatDate(formatDate(d))}}]", &data), "[]");
    }

    #[test]
    fn test_unterminated_marker_is_verbatim() {
        let data = json!({"a": "x"});
        assert_eq!(substitute("{{a}} and {{a", &data), "x and {{a");
        assert_eq!(substitute("no markers", &data), "no markers");
    }

    #[test]
    fn test_literal_argument() {
        let data = json!({});
        assert_eq!(substitute("{{formatTime('2024-01-01T09:30:00Z')}}", &data), "09:30");
    }

    #[test]
    fn test_parse_shapes() {
        assert_eq!(Expression::parse("a.b"), Ok(Expression::Path("a.b".into())));
        assert_eq!(
            Expression::parse("formatDate( x.y )"),
            Ok(Expression::Call {
                helper: Helper::FormatDate,
                argument: Argument::Path("x.y".into())
            })
        );
        assert_eq!(
            Expression::parse("alert(1)"),
            Err(ExprError::UnknownHelper("alert".into()))
        );
        assert!(matches!(Expression::parse("formatDate(x"), Err(ExprError::MalformedCall(_))));
        assert!(matches!(Expression::parse("1abc(x)"), Err(ExprError::MalformedCall(_))));
    }

    #[test]
    fn test_markers() {
        assert_eq!(markers("a {{ x }} b {{y}} {{z"), vec!["x", "y"]);
        assert!(!has_markers("plain {{ text"));
    }
}
