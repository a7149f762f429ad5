// src/error.rs

//! Error types shared by every stage of the formula

use thiserror::Error;

/// Errors raised while resolving, building, staging or testing the formula
#[derive(Debug, Error)]
pub enum Error {
    /// A flag that is neither a current option nor a retired alias
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    /// An external build tool exited non-zero
    #[error("{step} failed with exit code {code:?}: {command}\n{output}")]
    BuildFailure {
        step: String,
        command: String,
        code: Option<i32>,
        output: String,
    },

    /// Build outputs expected by the stager are absent
    #[error("Staging failed: {0}")]
    StagingFailure(String),

    /// An acceptance check did not hold
    #[error("Acceptance check '{check}' failed: {message}")]
    AssertionFailure { check: String, message: String },

    /// A resolved dependency could not be located on the host
    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err.to_string())
    }
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_failure_keeps_tool_output() {
        let err = Error::BuildFailure {
            step: "primary-build".to_string(),
            command: "make HAVE_RULES=yes".to_string(),
            code: Some(2),
            output: "lib/token.cpp:12: error: expected ';'".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("primary-build"));
        assert!(message.contains("Some(2)"));
        assert!(message.contains("expected ';'"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: Error = io.into();
        assert!(matches!(err, Error::IoError(ref m) if m.contains("no such file")));
    }
}
