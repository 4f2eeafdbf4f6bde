//! User-facing failure and warning reporting.

use thiserror::Error;

/// An application failure raised from a command entry point.
///
/// Under [`Command::run`](crate::Command::run) the failure is logged,
/// printed to stderr, and the process exits with
/// [`code`](Failure::code) (1 unless overridden). Callers using
/// [`Command::try_run_from`](crate::Command::try_run_from) receive it
/// instead and decide for themselves.
///
/// # Examples
///
/// ```
/// use commandeer::Failure;
///
/// let failure = Failure::new("config file not found").with_code(3);
/// assert_eq!(failure.code(), 3);
/// assert_eq!(failure.to_string(), "config file not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Failure {
    message: String,
    code: i32,
}

impl Failure {
    /// Creates a failure with exit code 1.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 1,
        }
    }

    /// Overrides the exit code.
    pub fn with_code(mut self, code: i32) -> Self {
        self.code = code;
        self
    }

    /// The user-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The process exit code this failure requests.
    pub fn code(&self) -> i32 {
        self.code
    }
}

/// Logs and prints a warning; never terminates.
///
/// # Examples
///
/// ```
/// commandeer::warning("skipping unreadable entry");
/// ```
pub fn warning(message: impl std::fmt::Display) {
    tracing::warn!(warning = %message, "Command warning");
    eprintln!("warning: {message}");
}
