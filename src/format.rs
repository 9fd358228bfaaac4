//! Human-readable rendering of values for default error messages.

use serde_json::Value;

/// Renders a value the way default failure messages show it.
///
/// Strings appear verbatim, numbers and booleans as literals, structures as
/// compact JSON. An unset value renders as `undefined`.
///
/// # Example
///
/// ```rust
/// use triage::format::render;
/// use serde_json::json;
///
/// assert_eq!(render(Some(&json!("nana"))), "nana");
/// assert_eq!(render(Some(&json!([1, 2]))), "[1,2]");
/// assert_eq!(render(None), "undefined");
/// ```
pub fn render(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Returns the JSON type name for a value, `undefined` when unset.
pub fn type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}
