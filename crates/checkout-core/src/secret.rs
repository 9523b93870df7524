//! # Client Secret Provider
//!
//! The embedded checkout SDK is handed a way to *fetch* a client secret rather
//! than a secret value, so it can ask again when a secret expires. This module
//! models that capability: a zero-argument operation yielding a secret
//! asynchronously.

use crate::endpoints::SharedSessionEndpoints;
use crate::error::CheckoutResult;
use crate::session::ClientSecret;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::debug;

/// Boxed future produced by each provider invocation
pub type SecretFuture = Pin<Box<dyn Future<Output = CheckoutResult<ClientSecret>>>>;

/// Cloneable, repeatable `async fn() -> ClientSecret`
#[derive(Clone)]
pub struct ClientSecretProvider {
    fetch: Rc<dyn Fn() -> SecretFuture>,
}

impl ClientSecretProvider {
    /// Wrap any closure returning a future of a client secret
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = CheckoutResult<ClientSecret>> + 'static,
    {
        Self {
            fetch: Rc::new(move || Box::pin(fetch()) as SecretFuture),
        }
    }

    /// Provider that creates a new session on every call
    pub fn from_endpoints(endpoints: SharedSessionEndpoints) -> Self {
        Self::new(move || {
            let endpoints = endpoints.clone();
            async move {
                debug!("Fetching client secret");
                let response = endpoints.create_checkout_session().await?;
                Ok(response.client_secret)
            }
        })
    }

    /// Run one fetch
    pub fn fetch(&self) -> SecretFuture {
        (self.fetch)()
    }
}

impl fmt::Debug for ClientSecretProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSecretProvider").finish_non_exhaustive()
    }
}
