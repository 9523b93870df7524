//! # Session Types
//!
//! Wire types for the two checkout endpoints. The checkout session itself is
//! owned by the payment provider; these types only name what crosses the wire.

use crate::error::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque checkout session identifier (e.g. `cs_test_a1B2...`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap a raw identifier. Empty identifiers are rejected.
    pub fn new(raw: impl Into<String>) -> CheckoutResult<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(CheckoutError::MissingSessionId);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Short-lived token that authorizes the embedded widget for one session.
///
/// `Debug` never prints the token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientSecret(String);

impl ClientSecret {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(<redacted>)")
    }
}

/// Session lifecycle status as reported by the payment provider.
///
/// Only `open` and `complete` are acted upon; every other value is carried
/// verbatim in `Other` and never fails to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SessionStatus {
    /// Created, payment not finished
    Open,
    /// Payment finished (terminal)
    Complete,
    /// Anything else (`expired`, future provider states, ...)
    Other(String),
}

impl SessionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SessionStatus::Open => "open",
            SessionStatus::Complete => "complete",
            SessionStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for SessionStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "open" => SessionStatus::Open,
            "complete" => SessionStatus::Complete,
            _ => SessionStatus::Other(raw),
        }
    }
}

impl From<&str> for SessionStatus {
    fn from(raw: &str) -> Self {
        SessionStatus::from(raw.to_string())
    }
}

impl From<SessionStatus> for String {
    fn from(status: SessionStatus) -> Self {
        match status {
            SessionStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /create-checkout-session`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub client_secret: ClientSecret,
}

impl CreateSessionResponse {
    pub fn new(client_secret: impl Into<String>) -> Self {
        Self {
            client_secret: ClientSecret::new(client_secret),
        }
    }
}

/// Body of `GET /session-status?session_id=...`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatusResponse {
    pub status: SessionStatus,

    /// Present once the session is `complete`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}
