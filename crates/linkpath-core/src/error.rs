//! Error types and exit codes for linkpath
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (including `--require` with no path found)
//! - 2: Usage error (bad flags/args, invalid configuration values)
//! - 3: Data error (missing graph file, missing document directory, malformed config, unknown node)
//!
//! Expansion failures never surface here: the search engine degrades them to
//! empty neighbor sets (see [`crate::oracle::ExpansionError`]).

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the linkpath CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - bad graph file, missing documents (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during linkpath operations
#[derive(Error, Debug)]
pub enum LinkpathError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("invalid graph file {path:?}: {reason}")]
    InvalidGraph { path: PathBuf, reason: String },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("no path found between {source_node:?} and {target_node:?}")]
    NoPathFound {
        source_node: String,
        target_node: String,
    },

    #[error("search interrupted")]
    Interrupted,

    #[error("{0}")]
    Other(String),
}

impl LinkpathError {
    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        LinkpathError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        LinkpathError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a graph file that could not be parsed
    pub fn invalid_graph(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        LinkpathError::InvalidGraph {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an error for a failed operation
    pub fn failed(operation: &str, reason: impl std::fmt::Display) -> Self {
        LinkpathError::FailedOperation {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            LinkpathError::UnknownFormat(_)
            | LinkpathError::UsageError(_)
            | LinkpathError::InvalidValue { .. } => ExitCode::Usage,

            LinkpathError::InvalidGraph { .. }
            | LinkpathError::NotFound { .. }
            | LinkpathError::Toml(_) => ExitCode::Data,

            LinkpathError::Io(_)
            | LinkpathError::Json(_)
            | LinkpathError::FailedOperation { .. }
            | LinkpathError::NoPathFound { .. }
            | LinkpathError::Interrupted
            | LinkpathError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            LinkpathError::UnknownFormat(_) => "unknown_format",
            LinkpathError::UsageError(_) => "usage_error",
            LinkpathError::InvalidValue { .. } => "invalid_value",
            LinkpathError::InvalidGraph { .. } => "invalid_graph",
            LinkpathError::NotFound { .. } => "not_found",
            LinkpathError::Io(_) => "io_error",
            LinkpathError::Json(_) => "json_error",
            LinkpathError::Toml(_) => "toml_error",
            LinkpathError::FailedOperation { .. } => "failed_operation",
            LinkpathError::NoPathFound { .. } => "no_path_found",
            LinkpathError::Interrupted => "interrupted",
            LinkpathError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for linkpath operations
pub type Result<T> = std::result::Result<T, LinkpathError>;
