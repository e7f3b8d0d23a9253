//! Error types for partnertap.

use thiserror::Error;

/// Result type alias for partnertap operations.
pub type Result<T> = std::result::Result<T, TapError>;

/// Errors that can occur while extracting and emitting records.
///
/// None of these are retried internally; every variant ends the run.
#[derive(Error, Debug)]
pub enum TapError {
    /// Missing or invalid configuration (start date, credentials).
    #[error("Configuration error: {0}")]
    Config(String),

    /// No registry entry exists for the requested stream.
    #[error("Unknown stream: {0}")]
    UnknownStream(String),

    /// The start date could not be parsed.
    #[error("Invalid start date {input:?}: {source}")]
    DateParse {
        /// The rejected input.
        input: String,
        /// Underlying chrono error.
        #[source]
        source: chrono::ParseError,
    },

    /// The HTTP exchange for a day failed.
    #[error("Transport error for {day}: {message}")]
    Transport {
        /// Day window being requested.
        day: String,
        /// HTTP status code, when the server answered.
        status: Option<u16>,
        /// Human readable detail.
        message: String,
    },

    /// The response body was not JSON or lacked the expected path.
    #[error("Unexpected response shape for {day}: {message}")]
    ResponseShape {
        /// Day window being requested.
        day: String,
        /// What was wrong with the body.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TapError {
    /// Returns true for errors raised before any network activity.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::UnknownStream(_) | Self::DateParse { .. }
        )
    }

    /// Returns the HTTP status carried by a transport error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}
