//! Top-level error types for the fxpack binary.

use thiserror::Error;

/// Result type alias for top-level operations
pub type Result<T> = std::result::Result<T, FxpackError>;

/// Main error type wrapping all layers of the tool
#[derive(Error, Debug)]
pub enum FxpackError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Bundling errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
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

    /// The build-descriptor file could not be read
    #[error("Cannot read config file {path}: {reason}")]
    ConfigUnreadable {
        /// Path that was attempted
        path: String,
        /// Reason for the error
        reason: String,
    },
}
