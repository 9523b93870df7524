//! # Session Endpoints
//!
//! The two server endpoints the page flows talk to, as a trait so the flows
//! can run against HTTP in the browser and against fakes in tests.
//!
//! ```text
//! POST /create-checkout-session            -> { "clientSecret": "..." }
//! GET  /session-status?session_id={id}     -> { "status": "...", "customer_email": "..." }
//! ```

use crate::error::CheckoutResult;
use crate::session::{CreateSessionResponse, SessionId, SessionStatusResponse};
use async_trait::async_trait;
use std::rc::Rc;

/// Remote collaborator owning checkout sessions.
///
/// Futures are `?Send`: browser fetch futures are bound to the page's thread.
#[async_trait(?Send)]
pub trait SessionEndpoints {
    /// `POST` with no body; yields the client secret of a fresh session.
    async fn create_checkout_session(&self) -> CheckoutResult<CreateSessionResponse>;

    /// `GET` the status of an existing session.
    async fn session_status(&self, session_id: &SessionId)
        -> CheckoutResult<SessionStatusResponse>;
}

/// Shared handle to an endpoint implementation
pub type SharedSessionEndpoints = Rc<dyn SessionEndpoints>;
