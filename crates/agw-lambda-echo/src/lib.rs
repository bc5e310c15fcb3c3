//! AWS Lambda function echoing API Gateway proxy requests.
//!
//! The delegate reads the proxy event, echoes method, path, query and body
//! back to the caller and leaves response shaping to the proxy adapter.
//!
//! Query parameters drive the response:
//!
//! - `status`: status code to respond with (passed through as text)
//! - `fail`: fail the request with this message, using `status` as its code

use std::collections::BTreeMap;

use lambda_runtime::{Context, Error};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use agw_lambda_proxy::{init_tracing, Failure, Handler, Headers, OptionsOverrides};

/// Environment variable holding JSON option overrides for the adapter.
pub const OPTIONS_ENV: &str = "PROXY_OPTIONS";

/// Header carrying the invocation's request id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// The parts of an API Gateway proxy event the echo function reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Echoed request details.
#[derive(Debug, Serialize)]
pub struct Echo {
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub query: BTreeMap<String, String>,
    /// Request body, decoded as JSON when possible.
    pub body: Value,
}

/// Response returned to the adapter.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    pub body: Echo,
    pub headers: Headers,
}

/// Entry point used by the Lambda runtime.
pub async fn run() -> Result<(), Error> {
    init_tracing();

    let overrides = load_overrides()?;
    let handler = Handler::builder().delegate(echo).overrides(overrides).build()?;

    agw_lambda_proxy::run(handler).await
}

/// Read adapter overrides from [`OPTIONS_ENV`]; unset means no overrides.
pub fn load_overrides() -> Result<OptionsOverrides, serde_json::Error> {
    match std::env::var(OPTIONS_ENV) {
        Ok(json) if !json.trim().is_empty() => serde_json::from_str(&json),
        _ => Ok(OptionsOverrides::default()),
    }
}

/// Delegate invoked per request.
pub async fn echo(event: Value, context: Context) -> Result<EchoResponse, Failure> {
    let request_id = context.request_id;

    let request: ProxyRequest = serde_json::from_value(event).map_err(|e| {
        error!(request_id = %request_id, error = %e, "failed to parse request");
        Failure::new(format!("Invalid request: {}", e)).with_code(400)
    })?;

    let query = request.query_string_parameters.unwrap_or_default();
    let status = query.get("status").cloned();

    info!(
        request_id = %request_id,
        method = ?request.http_method,
        path = ?request.path,
        "handling echo request"
    );

    if let Some(message) = query.get("fail") {
        let failure = Failure::new(message.clone());
        return Err(match status.as_deref().and_then(|s| s.parse().ok()) {
            Some(code) => failure.with_code(code),
            None => failure,
        });
    }

    let body = match request.body {
        Some(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
        None => Value::Null,
    };

    Ok(EchoResponse {
        status_code: status,
        headers: Headers::from([(REQUEST_ID_HEADER.to_string(), request_id.clone())]),
        body: Echo {
            request_id,
            method: request.http_method,
            path: request.path,
            query,
            body,
        },
    })
}
