//! Normalization of delegate results into API Gateway proxy responses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::body::format_body;
use crate::headers::{headers_from_value, merge_headers, Headers};
use crate::options::Options;

/// Status used when a result does not carry a usable one.
pub const DEFAULT_STATUS: u16 = 200;

const STATUS_CODE_KEY: &str = "statusCode";
const BODY_KEY: &str = "body";
const HEADERS_KEY: &str = "headers";

/// Response handed back to API Gateway.
///
/// # Example
///
/// ```
/// use agw_lambda_proxy::{normalize, Options};
/// use serde_json::json;
///
/// let response = normalize(&json!({"statusCode": 201}), &Options::default());
/// assert_eq!(response.status_code, 201);
/// assert_eq!(response.body, "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResponse {
    pub status_code: u16,
    pub body: String,
    pub headers: Headers,
}

impl NormalizedResponse {
    /// Plain response carrying `body` with configured headers.
    pub(crate) fn with_body(status_code: u16, body: String, options: &Options) -> Self {
        Self {
            status_code,
            body,
            headers: merge_headers(&options.headers, None),
        }
    }
}

impl TryFrom<NormalizedResponse> for http::Response<String> {
    type Error = http::Error;

    fn try_from(response: NormalizedResponse) -> Result<Self, Self::Error> {
        let mut builder = http::Response::builder().status(response.status_code);
        for (name, value) in &response.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.body(response.body)
    }
}

/// How a delegate result is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape<'a> {
    /// `null`: empty 200 response.
    Empty,
    /// A string used verbatim as the body.
    Text(&'a str),
    /// An object declaring at least one of `statusCode`, `body`, `headers`.
    Shaped(&'a Map<String, Value>),
    /// Any other value, sent whole as the JSON body.
    Bare(&'a Value),
}

/// Decide how a delegate result should be turned into a response.
///
/// Only the object's own keys are looked at. One recognized key is enough to
/// treat the object as a response; the missing fields then take defaults.
pub fn classify(result: &Value) -> ResultShape<'_> {
    match result {
        Value::Null => ResultShape::Empty,
        Value::String(s) => ResultShape::Text(s),
        Value::Object(map)
            if [STATUS_CODE_KEY, BODY_KEY, HEADERS_KEY]
                .iter()
                .any(|key| map.contains_key(*key)) =>
        {
            ResultShape::Shaped(map)
        }
        other => ResultShape::Bare(other),
    }
}

/// Normalize a delegate result.
pub fn normalize(result: &Value, options: &Options) -> NormalizedResponse {
    match classify(result) {
        ResultShape::Empty => NormalizedResponse::with_body(DEFAULT_STATUS, String::new(), options),
        ResultShape::Text(text) => {
            NormalizedResponse::with_body(DEFAULT_STATUS, text.to_string(), options)
        }
        ResultShape::Shaped(map) => {
            let response_headers = map.get(HEADERS_KEY).and_then(headers_from_value);
            NormalizedResponse {
                status_code: map
                    .get(STATUS_CODE_KEY)
                    .and_then(parse_status_code)
                    .unwrap_or(DEFAULT_STATUS),
                body: format_body(map.get(BODY_KEY)),
                headers: merge_headers(&options.headers, response_headers.as_ref()),
            }
        }
        ResultShape::Bare(value) => {
            NormalizedResponse::with_body(DEFAULT_STATUS, format_body(Some(value)), options)
        }
    }
}

/// Read a status code from a number or numeric string.
///
/// Zero and values outside the `u16` range are rejected.
fn parse_status_code(value: &Value) -> Option<u16> {
    let code = match value {
        Value::Number(n) => match n.as_u64() {
            Some(code) => code,
            None => {
                let float = n.as_f64()?;
                if !float.is_finite() || float < 0.0 {
                    return None;
                }
                float.trunc() as u64
            }
        },
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    u16::try_from(code).ok().filter(|code| *code != 0)
}
