//! Conversion of arbitrary body values into response text.

use serde_json::Value;

/// Turn a body value into the string sent to the gateway.
///
/// Missing and "empty" values become an empty string. Empty means `null`,
/// `false`, numeric zero and `""`, so a body of `0` or `false` is not sent.
/// Strings pass through untouched and everything else is JSON-encoded.
pub fn format_body(body: Option<&Value>) -> String {
    match body {
        None => String::new(),
        Some(value) if is_empty(value) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(value) => value.to_string(),
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
