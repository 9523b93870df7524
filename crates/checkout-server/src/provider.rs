//! # Session Provider
//!
//! Server-side seam to the payment provider that owns checkout sessions.

use crate::error::ServerResult;
use async_trait::async_trait;
use checkout_core::{ClientSecret, SessionId, SessionStatus};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// A freshly created embedded session
#[derive(Debug, Clone)]
pub struct CreatedSession {
    pub session_id: String,
    pub client_secret: ClientSecret,
    pub expires_at: Option<DateTime<Utc>>,
}

/// What the provider currently says about a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub customer_email: Option<String>,
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Create an embedded checkout session whose return URL carries
    /// `session_id={CHECKOUT_SESSION_ID}`.
    async fn create_embedded_session(&self, return_url: &str) -> ServerResult<CreatedSession>;

    /// Look up an existing session
    async fn retrieve_session(&self, session_id: &SessionId) -> ServerResult<SessionSnapshot>;

    /// Provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared provider (dynamic dispatch)
pub type SharedSessionProvider = Arc<dyn SessionProvider>;
