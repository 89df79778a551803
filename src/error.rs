//! Command errors
//!
//! Two kinds of failure cross the command boundary. Both carry an optional
//! message, the process exit code to use and an optional underlying cause.
//! The [`Manager`](crate::cli::Manager) is the only place that turns them
//! into output and an exit code.

use std::error::Error as StdError;

/// Successful execution
pub const SUCCESS: i32 = 0;

/// Missing command name or unspecified command failure
pub const FAILURE: i32 = 1;

/// Narrows an exit code to a process exit status. Codes outside `0..=255`
/// would wrap, so they become [`FAILURE`].
pub fn exit_status(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(FAILURE as u8)
}

/// Result alias used by commands and the manager
pub type Result<T> = std::result::Result<T, Error>;

/// The kind of a command failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Any failure other than bad invocation arguments: unknown command,
    /// unimplemented command, or a failure raised by the command itself.
    Command,

    /// The caller supplied invalid, missing or excess arguments for a
    /// specific command. Reported together with that command's usage line.
    Argument,
}

/// Error raised by commands and by command lookup
#[derive(Debug, thiserror::Error)]
#[error("{}", .message.as_deref().unwrap_or_default())]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    retcode: i32,
    #[source]
    cause: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    /// Creates an error of the given kind with no message
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            retcode: FAILURE,
            cause: None,
        }
    }

    /// Creates a generic command failure
    pub fn command(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Command).with_message(message)
    }

    /// Creates an invalid-arguments failure
    pub fn argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Argument).with_message(message)
    }

    /// Replaces the message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the process exit code reported for this error
    pub fn with_retcode(mut self, retcode: i32) -> Self {
        self.retcode = retcode;
        self
    }

    /// Attaches the underlying cause
    pub fn with_cause(mut self, cause: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The message, if one was given. May be empty.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn retcode(&self) -> i32 {
        self.retcode
    }

    pub fn is_argument(&self) -> bool {
        self.kind == ErrorKind::Argument
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::command(format!("{:#}", err)).with_cause(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_failure_retcode() {
        let err = Error::command("boom");
        assert_eq!(err.kind(), ErrorKind::Command);
        assert_eq!(err.retcode(), FAILURE);
        assert_eq!(err.to_string(), "boom");
        assert!(err.source().is_none());
    }

    #[test]
    fn message_is_optional() {
        let err = Error::new(ErrorKind::Argument);
        assert!(err.is_argument());
        assert_eq!(err.message(), None);
        assert_eq!(err.to_string(), "");
    }

    #[test]
    fn retcode_and_cause() {
        let cause = "x".parse::<i32>().unwrap_err();
        let err = Error::argument("bad number")
            .with_retcode(4)
            .with_cause(cause);

        assert_eq!(err.retcode(), 4);
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("invalid digit found in string".to_string())
        );
    }

    #[test]
    fn from_anyhow_keeps_context_chain() {
        let err: Error = anyhow::anyhow!("disk full")
            .context("Failed to write report")
            .into();

        assert_eq!(err.kind(), ErrorKind::Command);
        assert_eq!(err.message(), Some("Failed to write report: disk full"));
        assert!(err.source().is_some());
    }

    #[test]
    fn exit_status_clamps_out_of_range_codes() {
        assert_eq!(exit_status(SUCCESS), 0);
        assert_eq!(exit_status(3), 3);
        assert_eq!(exit_status(255), 255);
        assert_eq!(exit_status(256), 1);
        assert_eq!(exit_status(-1), 1);
    }
}
