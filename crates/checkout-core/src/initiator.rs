//! # Checkout Initiator
//!
//! Checkout-page flow: hand the SDK a client-secret provider backed by the
//! session-creation endpoint, then mount the widget it returns.
//!
//! Failures are propagated untouched. The page gets no error state; the
//! caller decides what a rejected initialization means.

use crate::config::CheckoutConfig;
use crate::endpoints::SharedSessionEndpoints;
use crate::error::CheckoutResult;
use crate::sdk::{EmbeddedCheckout, EmbeddedCheckoutSdk};
use crate::secret::ClientSecretProvider;
use tracing::{info, instrument};

pub struct CheckoutInitiator<S> {
    sdk: S,
    endpoints: SharedSessionEndpoints,
    mount_selector: String,
}

impl<S: EmbeddedCheckoutSdk> CheckoutInitiator<S> {
    pub fn new(sdk: S, endpoints: SharedSessionEndpoints, config: &CheckoutConfig) -> Self {
        Self {
            sdk,
            endpoints,
            mount_selector: config.mount_selector.clone(),
        }
    }

    /// Initialize the embedded checkout and mount it.
    ///
    /// Returns the mounted widget handle; dropping it is up to the caller.
    #[instrument(skip(self), fields(selector = %self.mount_selector))]
    pub async fn initialize(&self) -> CheckoutResult<S::Checkout> {
        let fetch_client_secret = ClientSecretProvider::from_endpoints(self.endpoints.clone());

        let checkout = self.sdk.init_embedded_checkout(fetch_client_secret).await?;
        checkout.mount(&self.mount_selector)?;

        info!("Mounted embedded checkout into {}", self.mount_selector);
        Ok(checkout)
    }
}
