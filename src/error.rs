//! Application-level error types.
//!
//! Library operations report [`crate::bundler::Error`]; this module wraps those
//! together with CLI failures for the binary entry point.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, PrepareError>;

/// Main error type returned by [`crate::cli::run`]
#[derive(Error, Debug)]
pub enum PrepareError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Configuration or preparation errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),
}

impl From<crate::bundler::ConfigError> for PrepareError {
    fn from(err: crate::bundler::ConfigError) -> Self {
        Self::Bundler(err.into())
    }
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}
