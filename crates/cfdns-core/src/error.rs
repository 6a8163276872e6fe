//! Error types for cfdns
//!
//! This module defines all error types used throughout the workspace.

use thiserror::Error;

/// Result type alias for cfdns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for cfdns
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid user input (bad IP literal, missing flag, malformed name)
    ///
    /// Always raised before any network activity.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level failure (timeout, DNS failure, connection refused)
    #[error("Network error: {0}")]
    Network(String),

    /// The provider answered, but reported failure
    ///
    /// Covers non-2xx responses, `success: false` envelopes and success
    /// bodies that could not be decoded.
    #[error("Provider error ({provider}, {}): {body}", status_label(.status))]
    Provider {
        /// Provider name
        provider: String,
        /// HTTP status code, when a response was received
        status: Option<u16>,
        /// Raw response body or failure description
        body: String,
    },

    /// Zone or record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local I/O errors (token prompt)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("HTTP {}", code),
        None => "no status".to_string(),
    }
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a provider error
    pub fn provider(provider: impl Into<String>, status: Option<u16>, body: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            status,
            body: body.into(),
        }
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Whether this error stems from the caller's input rather than from
    /// the provider or the network
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::Config(_))
    }

    /// HTTP status carried by a provider error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Provider { status, .. } => *status,
            _ => None,
        }
    }
}
