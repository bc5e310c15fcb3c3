//! Adapter options and their defaults.
//!
//! [`Options::default`] builds a fresh record every time it is called; a
//! wrapped handler owns its own copy and never mutates it after construction.
//! Overrides can also be supplied as JSON through [`OptionsOverrides`], which
//! replaces default keys one level deep and ignores unknown keys.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::failure::Failure;
use crate::headers::{default_headers, headers_from_value, Headers};

/// Maps a failure to the message placed in the error response body.
pub type ErrorFormatter = Arc<dyn Fn(&Failure) -> String + Send + Sync>;

/// Configuration for a wrapped handler.
#[derive(Clone)]
pub struct Options {
    /// Headers applied to every response.
    pub headers: Headers,
    /// Add a CloudWatch log link to error responses.
    pub cloud_watch_log_links: bool,
    /// Log delegate failures.
    pub log_errors: bool,
    /// Produces the error message for failure responses.
    pub error_formatter: ErrorFormatter,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            headers: default_headers(),
            cloud_watch_log_links: true,
            log_errors: true,
            error_formatter: default_error_formatter(),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("headers", &self.headers)
            .field("cloud_watch_log_links", &self.cloud_watch_log_links)
            .field("log_errors", &self.log_errors)
            .finish_non_exhaustive()
    }
}

impl Options {
    /// Apply overrides on top of these options.
    ///
    /// Only keys present in `overrides` are replaced. `headers` replaces the
    /// whole mapping rather than merging into it.
    pub fn with_overrides(mut self, overrides: OptionsOverrides) -> Self {
        if let Some(headers) = overrides.headers {
            self.headers = headers;
        }
        if let Some(enabled) = overrides.cloud_watch_log_links {
            self.cloud_watch_log_links = enabled;
        }
        if let Some(enabled) = overrides.log_errors {
            self.log_errors = enabled;
        }
        self
    }

    /// Defaults merged with overrides parsed from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let overrides: OptionsOverrides = serde_json::from_str(json)?;
        Ok(Self::default().with_overrides(overrides))
    }
}

/// Serializable subset of [`Options`] used for configuration files and
/// environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsOverrides {
    /// Read like response headers: non-string values are rendered as JSON
    /// text, `null` entries are dropped and a non-object counts as absent.
    #[serde(default, deserialize_with = "lenient_headers")]
    pub headers: Option<Headers>,
    #[serde(default)]
    pub cloud_watch_log_links: Option<bool>,
    #[serde(default)]
    pub log_errors: Option<bool>,
}

fn lenient_headers<'de, D>(deserializer: D) -> Result<Option<Headers>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(headers_from_value))
}

/// The formatter used when none is configured: the failure message.
pub fn default_error_formatter() -> ErrorFormatter {
    Arc::new(|failure: &Failure| failure.message().to_string())
}
