//! The wrapped handler: invokes a delegate and normalizes its outcome.
//!
//! A [`Handler`] owns the delegate, the options and the log link
//! configuration. Each call awaits the delegate once and produces exactly one
//! [`NormalizedResponse`]:
//!
//! - a successful result goes through [`normalize`]
//! - an error or a panic goes through [`ErrorTranslator`]
//!
//! Failures never leave the handler as errors. The only exception is a result
//! that cannot be serialized to JSON, which is returned as
//! [`SerializationError`].

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use lambda_runtime::{Context, LambdaEvent};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::context::RequestContext;
use crate::error::{ConstructionError, SerializationError};
use crate::failure::Failure;
use crate::headers::Headers;
use crate::log_link::LogLinkConfig;
use crate::options::{Options, OptionsOverrides};
use crate::response::{normalize, NormalizedResponse};
use crate::translate::ErrorTranslator;

/// A delegate wrapped with response normalization.
///
/// # Example
///
/// ```
/// use agw_lambda_proxy::{Failure, Handler};
/// use serde_json::{json, Value};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let handler = Handler::builder()
///     .delegate(|event: Value, _ctx: &str| async move {
///         Ok::<_, Failure>(json!({ "statusCode": 201, "body": event }))
///     })
///     .cloud_watch_log_links(false)
///     .build()
///     .unwrap();
///
/// let response = handler.call(json!({"id": 1}), "req-1").await.unwrap();
/// assert_eq!(response.status_code, 201);
/// assert_eq!(response.body, r#"{"id":1}"#);
/// # }
/// ```
pub struct Handler<F> {
    delegate: F,
    options: Options,
    translator: ErrorTranslator,
}

impl<F> std::fmt::Debug for Handler<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handler")
            .field("options", &self.options)
            .field("translator", &self.translator)
            .finish_non_exhaustive()
    }
}

impl<F> Handler<F> {
    /// Start building a handler.
    pub fn builder() -> HandlerBuilder<F> {
        HandlerBuilder::new()
    }

    /// Wrap `delegate` with the given options.
    pub fn new(delegate: F, options: Options) -> Result<Self, ConstructionError> {
        HandlerBuilder::new()
            .delegate(delegate)
            .options(options)
            .build()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Invoke the delegate and normalize its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`SerializationError`] when the delegate's result cannot be
    /// converted to JSON. Delegate failures are never returned as errors.
    pub async fn call<C, Fut, R, E>(
        &self,
        event: Value,
        context: C,
    ) -> Result<NormalizedResponse, SerializationError>
    where
        F: Fn(Value, C) -> Fut,
        Fut: Future<Output = Result<R, E>>,
        C: RequestContext,
        R: Serialize,
        E: Into<Failure>,
    {
        let request_id = context.request_id().to_owned();
        let delegate = &self.delegate;
        let outcome = AssertUnwindSafe(async move { delegate(event, context).await })
            .catch_unwind()
            .await;

        let failure = match outcome {
            Ok(Ok(result)) => {
                let value = serde_json::to_value(result)?;
                let response = normalize(&value, &self.options);
                debug!(
                    request_id = %request_id,
                    status_code = response.status_code,
                    "delegate result normalized"
                );
                return Ok(response);
            }
            Ok(Err(err)) => err.into(),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(request_id = %request_id, panic = %message, "delegate panicked");
                Failure::new(message)
            }
        };

        Ok(self
            .translator
            .translate(&failure, &request_id, &self.options))
    }

    /// Invoke the delegate and hand the response to `complete`.
    ///
    /// `complete` follows the `(error, result)` convention and is called
    /// once with no error and the normalized response. It is not called when
    /// the result cannot be serialized; that error is returned instead.
    pub async fn invoke<C, Fut, R, E, K>(
        &self,
        event: Value,
        context: C,
        complete: K,
    ) -> Result<(), SerializationError>
    where
        F: Fn(Value, C) -> Fut,
        Fut: Future<Output = Result<R, E>>,
        C: RequestContext,
        R: Serialize,
        E: Into<Failure>,
        K: FnOnce(Option<lambda_runtime::Error>, Option<NormalizedResponse>),
    {
        let response = self.call(event, context).await?;
        complete(None, Some(response));
        Ok(())
    }

    /// Handle an event delivered by `lambda_runtime`.
    pub async fn handle_event<Fut, R, E>(
        &self,
        event: LambdaEvent<Value>,
    ) -> Result<NormalizedResponse, lambda_runtime::Error>
    where
        F: Fn(Value, Context) -> Fut,
        Fut: Future<Output = Result<R, E>>,
        R: Serialize,
        E: Into<Failure>,
    {
        let context = event.context;
        Ok(self.call(event.payload, context).await?)
    }
}

/// Builder for [`Handler`].
///
/// Starts from [`Options::default`]; each setter replaces one option.
pub struct HandlerBuilder<F> {
    delegate: Option<F>,
    options: Options,
    log_links: Option<LogLinkConfig>,
}

impl<F> Default for HandlerBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> HandlerBuilder<F> {
    pub fn new() -> Self {
        Self {
            delegate: None,
            options: Options::default(),
            log_links: None,
        }
    }

    /// The function invoked for every event.
    pub fn delegate(mut self, delegate: F) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Replace all options.
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Apply deserialized overrides to the current options.
    pub fn overrides(mut self, overrides: OptionsOverrides) -> Self {
        self.options = self.options.with_overrides(overrides);
        self
    }

    /// Replace the configured headers.
    pub fn headers(mut self, headers: Headers) -> Self {
        self.options.headers = headers;
        self
    }

    /// Add or replace one configured header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.headers.insert(name.into(), value.into());
        self
    }

    pub fn cloud_watch_log_links(mut self, enabled: bool) -> Self {
        self.options.cloud_watch_log_links = enabled;
        self
    }

    pub fn log_errors(mut self, enabled: bool) -> Self {
        self.options.log_errors = enabled;
        self
    }

    pub fn error_formatter<G>(mut self, formatter: G) -> Self
    where
        G: Fn(&Failure) -> String + Send + Sync + 'static,
    {
        self.options.error_formatter = std::sync::Arc::new(formatter);
        self
    }

    /// Use this region and log group for log links instead of the
    /// environment.
    pub fn log_link_config(mut self, config: LogLinkConfig) -> Self {
        self.log_links = Some(config);
        self
    }

    /// Build the handler.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::MissingDelegate`] if no delegate was set.
    ///
    /// When log links are enabled without an explicit config, the region and
    /// log group are read from the environment here. If they are missing the
    /// handler is still built and error responses carry no `log` key.
    pub fn build(self) -> Result<Handler<F>, ConstructionError> {
        let delegate = self.delegate.ok_or(ConstructionError::MissingDelegate)?;

        let log_links = if self.options.cloud_watch_log_links {
            match self.log_links {
                Some(config) => Some(config),
                None => match LogLinkConfig::from_env() {
                    Ok(config) => Some(config),
                    Err(err) => {
                        warn!(missing = err.name, "log links disabled: {}", err);
                        None
                    }
                },
            }
        } else {
            None
        };

        Ok(Handler {
            delegate,
            options: self.options,
            translator: ErrorTranslator::new(log_links),
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "delegate panicked".to_string()
    }
}
