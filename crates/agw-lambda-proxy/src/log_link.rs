//! CloudWatch log viewer links for failed invocations.

use crate::error::MissingLogLinkVar;

/// Environment variable holding the function's region.
pub const REGION_ENV: &str = "AWS_REGION";

/// Environment variable holding the function's CloudWatch log group.
pub const LOG_GROUP_ENV: &str = "AWS_LAMBDA_LOG_GROUP_NAME";

const CONSOLE_DOMAIN: &str = "console.aws.amazon.com";

/// Region and log group used to build log links.
///
/// Resolved once when a handler is built and reused for every invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLinkConfig {
    region: String,
    log_group: String,
}

impl LogLinkConfig {
    pub fn new(region: impl Into<String>, log_group: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            log_group: log_group.into(),
        }
    }

    /// Read the configuration from the Lambda environment.
    pub fn from_env() -> Result<Self, MissingLogLinkVar> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`; empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MissingLogLinkVar>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(MissingLogLinkVar { name: key })
        };
        Ok(Self {
            region: read(REGION_ENV)?,
            log_group: read(LOG_GROUP_ENV)?,
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn log_group(&self) -> &str {
        &self.log_group
    }

    /// Link to the log events of a single request.
    ///
    /// The filter term is the quoted request id, percent-encoded.
    pub fn link_for(&self, request_id: &str) -> String {
        let filter = urlencoding::encode(&format!("\"{}\"", request_id)).into_owned();
        format!(
            "https://{region}.{CONSOLE_DOMAIN}/cloudwatch/home?region={region}#logEventViewer:group={group};filter={filter}",
            region = self.region,
            group = self.log_group,
        )
    }
}
