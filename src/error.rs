//! Error types for the rrdcached client
//!
//! Provides a unified error type for all operations. Connection-level
//! failures are kept apart from errors the daemon reports, so callers can
//! decide between reconnecting and handling a data error.

use thiserror::Error;

/// Result type alias using RrdError
pub type Result<T> = std::result::Result<T, RrdError>;

/// Unified error type for rrdcached client operations
#[derive(Debug, Error)]
pub enum RrdError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// Dial, write or read failure. The connection is unusable.
    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Daemon-Reported Errors
    // -------------------------------------------------------------------------
    /// The daemon does not implement the verb (older daemon version)
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// The named round-robin file does not exist on the daemon's filesystem
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// The daemon's argument parser rejected a flag or argument
    #[error("Unrecognized argument: {message}")]
    UnrecognizedArgument {
        message: String,
        argument: Option<String>,
    },

    /// Any other negative status, carrying the daemon's message
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    /// Unparseable status token, oversized or non-UTF-8 response
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RrdError {
    /// True when the transport is unusable and the caller must reconnect
    pub fn is_connection(&self) -> bool {
        matches!(self, RrdError::Connection(_))
    }

    /// The argument the daemon refused, for unrecognized-argument failures
    ///
    /// Lets a caller retry without a flag an older daemon does not know,
    /// e.g. `-O` on CREATE.
    pub fn bad_argument(&self) -> Option<&str> {
        match self {
            RrdError::UnrecognizedArgument { argument, .. } => argument.as_deref(),
            _ => None,
        }
    }

    /// Raw daemon text for errors reported by the daemon itself
    pub fn daemon_message(&self) -> Option<&str> {
        match self {
            RrdError::UnknownCommand(message)
            | RrdError::FileNotFound(message)
            | RrdError::Protocol(message)
            | RrdError::UnrecognizedArgument { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}
