//! Response normalization for AWS Lambda functions behind API Gateway's
//! proxy integration.
//!
//! A delegate can return a string, any serializable value, a partial
//! response (`statusCode`, `body`, `headers`), or fail. The wrapped
//! [`Handler`] turns every one of those outcomes into a
//! [`NormalizedResponse`]:
//!
//! - [`merge_headers`]: configured headers overwritten by response headers
//! - [`format_body`]: body values rendered as text
//! - [`classify`] / [`normalize`]: result shape detection and normalization
//! - [`ErrorTranslator`]: failures as error responses, with optional
//!   CloudWatch log links ([`LogLinkConfig`])
//! - [`init_tracing`]: JSON-formatted tracing for CloudWatch Logs
//! - [`run`]: serve a wrapped handler with `lambda_runtime`
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides mock contexts and a completion recorder.
//! Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod body;
mod context;
mod error;
mod failure;
mod handler;
mod headers;
mod log_link;
mod options;
mod response;
mod runtime;
mod tracing_init;
mod translate;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use body::format_body;
pub use context::RequestContext;
pub use error::{ConstructionError, MissingLogLinkVar, SerializationError};
pub use failure::Failure;
pub use handler::{Handler, HandlerBuilder};
pub use headers::{default_headers, merge_headers, Headers, CORS_ALLOW_ORIGIN};
pub use log_link::{LogLinkConfig, LOG_GROUP_ENV, REGION_ENV};
pub use options::{default_error_formatter, ErrorFormatter, Options, OptionsOverrides};
pub use response::{classify, normalize, NormalizedResponse, ResultShape, DEFAULT_STATUS};
pub use runtime::run;
pub use tracing_init::{init_tracing, init_tracing_with, LogFormat};
pub use translate::ErrorTranslator;
