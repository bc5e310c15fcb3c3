//! Request context supplied by the host.

/// The part of the invocation context the adapter relies on.
///
/// The context is otherwise passed to the delegate untouched.
pub trait RequestContext {
    /// Identifier of the current invocation.
    fn request_id(&self) -> &str;
}

impl RequestContext for lambda_runtime::Context {
    fn request_id(&self) -> &str {
        &self.request_id
    }
}

impl RequestContext for String {
    fn request_id(&self) -> &str {
        self
    }
}

impl RequestContext for &str {
    fn request_id(&self) -> &str {
        self
    }
}
