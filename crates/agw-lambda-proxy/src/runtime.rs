//! Registration of a wrapped handler with the Lambda runtime.

use std::future::Future;
use std::sync::Arc;

use lambda_runtime::{service_fn, Context, Error, LambdaEvent};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::failure::Failure;
use crate::handler::Handler;

/// Serve `handler` through `lambda_runtime` until the runtime shuts down.
///
/// The handler is built once and shared by every invocation.
pub async fn run<F, Fut, R, E>(handler: Handler<F>) -> Result<(), Error>
where
    F: Fn(Value, Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send,
    R: Serialize,
    E: Into<Failure>,
{
    info!(
        log_links = handler.options().cloud_watch_log_links,
        log_errors = handler.options().log_errors,
        header_count = handler.options().headers.len(),
        "starting API Gateway proxy handler"
    );

    let handler = Arc::new(handler);
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let handler = Arc::clone(&handler);
        async move { handler.handle_event(event).await }
    }))
    .await
}
