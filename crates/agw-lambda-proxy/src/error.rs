use thiserror::Error;

/// Raised when a wrapped handler cannot be built.
///
/// This is the only error the adapter surfaces directly to its caller; every
/// failure that happens during an invocation is turned into a response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// No delegate was supplied to the builder.
    #[error("\"delegate\" must be a function")]
    MissingDelegate,
}

/// Raised when the log link region or log group is not configured.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("log links require {name} to be set")]
pub struct MissingLogLinkVar {
    pub name: &'static str,
}

/// Raised when a delegate result cannot be turned into JSON.
///
/// This is not converted into an error response: it escapes the wrapper as an
/// `Err` and the host decides what to do with it.
#[derive(Debug, Error)]
#[error("failed to serialize delegate result: {0}")]
pub struct SerializationError(#[from] serde_json::Error);
