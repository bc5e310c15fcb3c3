//! Conversion of delegate failures into error responses.

use serde_json::{Map, Value};
use tracing::error;

use crate::body::format_body;
use crate::failure::Failure;
use crate::log_link::LogLinkConfig;
use crate::options::Options;
use crate::response::NormalizedResponse;

/// Turns failures into error responses.
///
/// Holds the log link configuration resolved when the handler was built.
/// A translator without a config, including `ErrorTranslator::default()`,
/// never adds a `log` key even when the options enable log links.
#[derive(Debug, Clone, Default)]
pub struct ErrorTranslator {
    log_links: Option<LogLinkConfig>,
}

impl ErrorTranslator {
    /// Translator that adds log links when `log_links` is set and the
    /// options enable them.
    pub fn new(log_links: Option<LogLinkConfig>) -> Self {
        Self { log_links }
    }

    /// Build the error response for `failure`.
    ///
    /// The body is `{"message": ..}` plus a `log` key holding the log link
    /// when links are enabled. The key is left out entirely otherwise.
    pub fn translate(
        &self,
        failure: &Failure,
        request_id: &str,
        options: &Options,
    ) -> NormalizedResponse {
        let status_code = failure.status_code();

        if options.log_errors {
            error!(
                request_id = %request_id,
                status_code,
                error = %failure,
                "delegate failed"
            );
        }

        let mut body = Map::new();
        body.insert(
            "message".to_string(),
            Value::String((options.error_formatter)(failure)),
        );
        if let Some(link) = self.log_link(request_id, options) {
            body.insert("log".to_string(), Value::String(link));
        }

        let body = format_body(Some(&Value::Object(body)));
        NormalizedResponse::with_body(status_code, body, options)
    }

    fn log_link(&self, request_id: &str, options: &Options) -> Option<String> {
        if !options.cloud_watch_log_links {
            return None;
        }
        self.log_links
            .as_ref()
            .map(|config| config.link_for(request_id))
    }
}
