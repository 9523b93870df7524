//! # Embedded Checkout SDK
//!
//! Seam around the third-party payment SDK. The SDK renders and owns the
//! payment UI; this crate only initializes it and mounts the widget.

use crate::error::CheckoutResult;
use crate::secret::ClientSecretProvider;
use async_trait::async_trait;

/// A third-party SDK instance, created once per page from a publishable key.
#[async_trait(?Send)]
pub trait EmbeddedCheckoutSdk {
    type Checkout: EmbeddedCheckout;

    /// Initialize the embedded checkout, handing over the secret provider.
    async fn init_embedded_checkout(
        &self,
        fetch_client_secret: ClientSecretProvider,
    ) -> CheckoutResult<Self::Checkout>;
}

/// Widget handle returned by the SDK
pub trait EmbeddedCheckout {
    /// Render the widget into the element matching `selector`.
    fn mount(&self, selector: &str) -> CheckoutResult<()>;
}
