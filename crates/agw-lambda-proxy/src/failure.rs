//! Failure values produced by delegates.

use thiserror::Error;

/// A delegate failure carrying a message and an optional status code.
///
/// Delegates return this (or anything convertible into it) from their error
/// branch. The wrapper turns it into a response with [`Failure::code`] as the
/// status, or 500 when no usable code is set.
///
/// # Example
///
/// ```
/// use agw_lambda_proxy::Failure;
///
/// let failure = Failure::new("item not found").with_code(404);
/// assert_eq!(failure.status_code(), 404);
/// assert_eq!(failure.to_string(), "item not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Failure {
    message: String,
    code: Option<u16>,
}

impl Failure {
    /// Status used when the failure has no usable code.
    pub const DEFAULT_STATUS: u16 = 500;

    /// Create a failure with no code.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    /// Attach a status code.
    pub fn with_code(mut self, code: u16) -> Self {
        self.code = Some(code);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<u16> {
        self.code
    }

    /// Status code for the error response. A zero code counts as unset.
    pub fn status_code(&self) -> u16 {
        match self.code {
            Some(code) if code != 0 => code,
            _ => Self::DEFAULT_STATUS,
        }
    }
}

impl From<&str> for Failure {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<anyhow::Error> for Failure {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<Failure>() {
            Ok(failure) => failure,
            Err(err) => Self::new(err.to_string()),
        }
    }
}

impl From<lambda_runtime::Error> for Failure {
    fn from(err: lambda_runtime::Error) -> Self {
        match err.downcast::<Failure>() {
            Ok(failure) => *failure,
            Err(err) => Self::new(err.to_string()),
        }
    }
}
