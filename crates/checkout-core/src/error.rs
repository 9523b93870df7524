//! # Checkout Error Types
//!
//! Typed error handling for the checkout page flows.
//! Client-side operations return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Core error type for the page flows and their collaborators
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Configuration errors (missing or malformed publishable key, bad paths)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The return page was opened without a usable `session_id`
    #[error("No session_id found in URL.")]
    MissingSessionId,

    /// Network/HTTP transport error talking to a checkout endpoint
    #[error("Network error: {0}")]
    Network(String),

    /// Endpoint answered with a non-success status
    #[error("Endpoint {endpoint} returned HTTP {status}: {body}")]
    HttpStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// Response body could not be decoded
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// The embedded checkout SDK rejected a call
    #[error("Checkout SDK error: {0}")]
    Sdk(String),

    /// Page/DOM access failed (missing element, navigation refused)
    #[error("Page error: {0}")]
    Dom(String),
}

impl From<serde_json::Error> for CheckoutError {
    fn from(err: serde_json::Error) -> Self {
        CheckoutError::Deserialization(err.to_string())
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;
