//! Error types for the bundling pipeline.
//!
//! Splits failures into the taxonomy the orchestrator relies on: fatal
//! configuration errors abort the whole run, per-engine signals are handled
//! by the failure policy, and best-effort workaround failures never surface
//! here at all (they are logged as warnings at the call site).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bundling operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the bundling pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// Catch-all with a preformatted message (used by the `bail!` macro)
    #[error("{0}")]
    GenericError(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Filesystem operation with context about what was being done
    #[error("failed {action} at {path:?}: {source}")]
    Fs {
        /// What the operation was doing
        action: String,
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Directory walk errors
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// User bundle-arguments collide with derived parameters
    #[error("the following bundle-argument keys duplicate derived settings, please remove one or the other: {keys:?}")]
    DuplicateBundleArguments {
        /// The colliding keys, sorted
        keys: Vec<String>,
    },

    /// Secondary launcher configuration is incomplete or ambiguous
    #[error("launcher configuration error: {0}")]
    LauncherConfiguration(String),

    /// No bundler engines were registered at all
    #[error("no bundler engines registered; register built-in or custom engines before running")]
    EmptyEngineRegistry,

    /// No engine matched the requested identifier (strict mode only)
    #[error("no bundler ran for requested id {0:?}, please check your configuration")]
    NoEngineMatched(String),

    /// An engine reported a configuration error under strict failure policy
    #[error("engine {name:?} failed with configuration error: {message}\nAdvice to fix: {advice}")]
    EngineConfig {
        /// Human name of the engine
        name: String,
        /// What went wrong
        message: String,
        /// How to fix it
        advice: String,
    },

    /// A signing precondition was violated before any subprocess was spawned
    #[error("signing precondition failed: {0}")]
    SigningPrecondition(String),

    /// The external per-jar signer exited non-zero
    #[error("signing {jar:?} with the external signer was not successful, please check the build log")]
    SignerFailed {
        /// The jar that failed to sign
        jar: PathBuf,
    },

    /// The combined (blob) signing invocation failed as a whole
    #[error("combined signing of {count} jar file(s) failed: {reason}")]
    BlobSigningFailed {
        /// How many jars were in the batch
        count: usize,
        /// Why the batch failed
        reason: String,
    },

    /// An external tool could not be located
    #[error("external tool lookup failed: {0}")]
    ToolLookup(#[from] which::Error),

    /// Invalid patch pattern (compile-time constant, should never happen)
    #[error("descriptor pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Signals an external bundler engine can raise.
///
/// These are the only two failure modes the engine contract knows about;
/// everything else an engine does wrong surfaces as a non-zero exit turned
/// into [`EngineError::Config`].
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine does not apply on this host. Always swallowed silently.
    #[error("engine does not support the current platform")]
    UnsupportedPlatform,

    /// A correctable user misconfiguration.
    #[error("{message}")]
    Config {
        /// What went wrong
        message: String,
        /// How to fix it
        advice: String,
    },
}

/// Result type alias for engine contract calls
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Attach a static message to `Option` / fallible values.
pub trait Context<T> {
    /// Converts to `Result`, wrapping `None`/`Err` with the given message.
    fn context(self, message: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, message: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(message.to_string()))
    }
}

impl<T, E: std::fmt::Display> Context<T> for std::result::Result<T, E> {
    fn context(self, message: &str) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{message}: {e}")))
    }
}

/// Attach filesystem context (action + path) to IO results.
pub trait ErrorExt<T> {
    /// Wraps an IO error with what was being done and where.
    fn fs_context(self, action: &str, path: &std::path::Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, action: &str, path: &std::path::Path) -> Result<T> {
        self.map_err(|source| Error::Fs {
            action: action.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::error::Error::GenericError(format!($($arg)*)).into())
    };
}
