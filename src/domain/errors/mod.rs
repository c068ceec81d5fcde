// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Failures raised while turning an `mkvinfo` report into a track inventory.
///
/// Every variant is fatal for the container being parsed; no partial
/// inventory is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The "Tracks" section is missing or appears more than once
    #[error("Malformed report: expected exactly one Tracks section, found {found}")]
    MalformedReport { found: usize },

    /// The track number could not be read from the block header
    #[error("Malformed track header: no track number in '{header}'")]
    MalformedTrackHeader { header: String },

    /// A fixed-position line or token is absent from a track block
    #[error("Malformed track block: {reason}")]
    MalformedTrackBlock { reason: String },
}

/// Domain-specific error types
#[derive(Error, Debug)]
pub enum DomainError {
    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),

    /// Inspection report could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// File system operation failed
    #[error("File system error: {0}")]
    FsFail(String),

    /// External tool could not be started
    #[error("Failed to launch {program}: {message}")]
    ToolLaunch { program: String, message: String },

    /// External tool ran but reported failure
    #[error("Command '{invocation}' failed ({status}): {stderr}")]
    ToolFailed {
        invocation: String,
        status: String,
        stderr: String,
    },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}
