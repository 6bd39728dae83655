//! Expression Engine - Data binding for document templates
//!
//! Three pure, total operations over a nested JSON data context:
//!
//! - path resolution (`a.b.c`), yielding `""` when anything is missing
//! - `{{expression}}` substitution, with a fixed set of date/time helpers
//! - `visibleIf` conditions of the single form `path === 'literal'`
//!
//! # Example
//!
//! ```rust
//! use expr_engine::{is_visible, resolve_path, substitute};
//! use serde_json::json;
//!
//! let data = json!({"a": {"b": 5}, "data": {"due": "2024-03-05T00:00:00Z"}});
//! assert_eq!(resolve_path(&data, "a.b"), "5");
//! assert_eq!(substitute("Due {{formatDate(data.due)}}", &data), "Due 05/03/2024");
//! assert!(is_visible(Some("a.b === '5'"), &data));
//! ```

mod error;
mod path;
mod helpers;
pub mod template;
pub mod condition;

pub use error::{ExprError, Result};
pub use path::{lookup, parse_path, resolve_path, value_to_string};
pub use helpers::{parse_timestamp, Helper};
pub use template::{evaluate_expression, has_markers, markers, substitute, substitute_with, Argument, Expression};
pub use condition::{evaluate_condition, is_visible, Condition, DEFAULT_VISIBILITY};
