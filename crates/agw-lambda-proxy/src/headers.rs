//! Header merging for normalized responses.

use std::collections::BTreeMap;

use serde_json::Value;

/// Header mapping carried by options and responses.
pub type Headers = BTreeMap<String, String>;

/// Header sent by default so browsers can call the API from any origin.
pub const CORS_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";

/// Headers applied to every response unless overridden.
pub fn default_headers() -> Headers {
    Headers::from([(CORS_ALLOW_ORIGIN.to_string(), "*".to_string())])
}

/// Merge configured headers with response headers.
///
/// Response headers replace configured ones key by key. Neither input is
/// modified; a missing response mapping behaves like an empty one.
pub fn merge_headers(configured: &Headers, response: Option<&Headers>) -> Headers {
    let mut merged = configured.clone();
    if let Some(response) = response {
        merged.extend(response.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    merged
}

/// Read a header mapping out of a delegate-supplied JSON value.
///
/// Returns `None` when the value is not an object. String values are taken
/// as-is, `null` entries are dropped and anything else is rendered as JSON.
pub(crate) fn headers_from_value(value: &Value) -> Option<Headers> {
    let object = value.as_object()?;
    let headers = object
        .iter()
        .filter_map(|(name, value)| {
            let rendered = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((name.clone(), rendered))
        })
        .collect();
    Some(headers)
}
