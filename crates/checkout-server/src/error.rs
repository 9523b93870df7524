//! # Server Error Types
//!
//! Errors raised while serving the session endpoints, with their HTTP mapping.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    Provider { provider: String, message: String },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    Network(String),

    /// Session unknown to the provider
    #[error("Session not found: {session_id}")]
    SessionNotFound { session_id: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ServerError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::Configuration(_) => 500,
            ServerError::InvalidRequest(_) => 400,
            ServerError::Provider { .. } => 502,
            ServerError::Network(_) => 503,
            ServerError::SessionNotFound { .. } => 404,
            ServerError::Serialization(_) => 500,
        }
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
