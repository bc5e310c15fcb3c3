//! Test utilities for wrapped handler testing.
//!
//! This module provides shared test infrastructure for crates that build on
//! the adapter: mock request contexts, a fixed log link configuration and a
//! recorder for the `(error, result)` completion callback.
//!
//! # Usage
//!
//! ```ignore
//! use agw_lambda_proxy::test_utils::{mock_context, CompletionRecorder};
//!
//! #[tokio::test]
//! async fn test_handler() {
//!     let recorder = CompletionRecorder::default();
//!     handler.invoke(event, mock_context("123"), recorder.callback()).await.unwrap();
//!     let response = recorder.single_response();
//! }
//! ```

use std::sync::{Arc, Mutex};

use crate::log_link::LogLinkConfig;
use crate::response::NormalizedResponse;

/// Region used by [`fixture_log_link_config`].
pub const FIXTURE_REGION: &str = "eu-west-1";

/// Log group used by [`fixture_log_link_config`].
pub const FIXTURE_LOG_GROUP: &str = "/aws/lambda/agw-proxy-test";

/// Create a mock request ID for testing.
///
/// Returns a request ID string in the format "test-request-{suffix}".
pub fn mock_request_id(suffix: &str) -> String {
    format!("test-request-{}", suffix)
}

/// A `lambda_runtime::Context` carrying a mock request ID.
pub fn mock_context(suffix: &str) -> lambda_runtime::Context {
    let mut context = lambda_runtime::Context::default();
    context.request_id = mock_request_id(suffix);
    context
}

/// Log link configuration that does not depend on the environment.
pub fn fixture_log_link_config() -> LogLinkConfig {
    LogLinkConfig::new(FIXTURE_REGION, FIXTURE_LOG_GROUP)
}

/// One recorded call of the completion callback.
#[derive(Debug, Clone)]
pub struct Completion {
    /// Text of the error argument, if one was passed.
    pub error: Option<String>,
    pub response: Option<NormalizedResponse>,
}

/// Records every call of a completion callback.
#[derive(Debug, Clone, Default)]
pub struct CompletionRecorder {
    calls: Arc<Mutex<Vec<Completion>>>,
}

impl CompletionRecorder {
    /// A callback that appends to this recorder.
    pub fn callback(
        &self,
    ) -> impl FnOnce(Option<lambda_runtime::Error>, Option<NormalizedResponse>) {
        let calls = Arc::clone(&self.calls);
        move |error, response| {
            calls
                .lock()
                .expect("completion recorder poisoned")
                .push(Completion {
                    error: error.map(|e| e.to_string()),
                    response,
                });
        }
    }

    /// All recorded calls.
    pub fn calls(&self) -> Vec<Completion> {
        self.calls
            .lock()
            .expect("completion recorder poisoned")
            .clone()
    }

    /// The response of the only recorded call.
    ///
    /// # Panics
    ///
    /// Panics unless exactly one call was recorded with no error and a
    /// response.
    pub fn single_response(&self) -> NormalizedResponse {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one completion");
        let call = calls.into_iter().next().expect("one completion");
        assert!(call.error.is_none(), "completion carried an error");
        call.response.expect("completion carried no response")
    }
}
