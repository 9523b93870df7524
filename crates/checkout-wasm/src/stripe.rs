//! # Stripe.js SDK
//!
//! `EmbeddedCheckoutSdk` backed by the global `Stripe` object. The SDK object
//! is created once per page and reused.

use crate::bindings::{new_stripe, JsEmbeddedCheckout, JsStripe};
use crate::js_error;
use async_trait::async_trait;
use checkout_core::{
    CheckoutError, CheckoutResult, ClientSecretProvider, EmbeddedCheckout, EmbeddedCheckoutSdk,
};
use js_sys::{Object, Promise, Reflect};
use std::cell::OnceCell;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};

thread_local! {
    static STRIPE: OnceCell<(String, JsStripe)> = const { OnceCell::new() };
}

/// Page-scoped Stripe.js instance
#[derive(Debug, Clone)]
pub struct StripeJs {
    inner: JsStripe,
}

impl StripeJs {
    /// Get the page's Stripe instance, creating it on first use.
    pub fn for_page(publishable_key: &str) -> CheckoutResult<Self> {
        STRIPE.with(|cell| {
            if let Some((key, stripe)) = cell.get() {
                if key != publishable_key {
                    warn!("Stripe already initialized with a different publishable key");
                }
                return Ok(Self {
                    inner: stripe.clone(),
                });
            }

            let stripe = new_stripe(publishable_key)
                .map_err(|e| CheckoutError::Sdk(format!("Stripe(): {}", js_error(&e))))?;
            debug!("Stripe.js instance created");
            let _ = cell.set((publishable_key.to_string(), stripe.clone()));
            Ok(Self { inner: stripe })
        })
    }
}

/// Build `{ fetchClientSecret }`. The closure has to outlive the checkout.
fn checkout_options(
    provider: ClientSecretProvider,
) -> CheckoutResult<(Object, Closure<dyn FnMut() -> Promise>)> {
    let fetch_client_secret = Closure::<dyn FnMut() -> Promise>::new(move || {
        let secret = provider.fetch();
        future_to_promise(async move {
            secret
                .await
                .map(|secret| JsValue::from_str(secret.as_str()))
                .map_err(|e| JsValue::from_str(&e.to_string()))
        })
    });

    let options = Object::new();
    Reflect::set(
        &options,
        &JsValue::from_str("fetchClientSecret"),
        fetch_client_secret.as_ref(),
    )
    .map_err(|e| CheckoutError::Sdk(js_error(&e)))?;

    Ok((options, fetch_client_secret))
}

#[async_trait(?Send)]
impl EmbeddedCheckoutSdk for StripeJs {
    type Checkout = StripeEmbeddedCheckout;

    async fn init_embedded_checkout(
        &self,
        fetch_client_secret: ClientSecretProvider,
    ) -> CheckoutResult<StripeEmbeddedCheckout> {
        let (options, closure) = checkout_options(fetch_client_secret)?;

        let promise = self
            .inner
            .init_embedded_checkout(&options)
            .map_err(|e| CheckoutError::Sdk(js_error(&e)))?;
        let checkout = JsFuture::from(promise)
            .await
            .map_err(|e| CheckoutError::Sdk(js_error(&e)))?;

        Ok(StripeEmbeddedCheckout {
            inner: checkout.unchecked_into(),
            _fetch_client_secret: closure,
        })
    }
}

/// Mounted (or mountable) embedded checkout
pub struct StripeEmbeddedCheckout {
    inner: JsEmbeddedCheckout,
    _fetch_client_secret: Closure<dyn FnMut() -> Promise>,
}

impl EmbeddedCheckout for StripeEmbeddedCheckout {
    fn mount(&self, selector: &str) -> CheckoutResult<()> {
        self.inner
            .mount(selector)
            .map_err(|e| CheckoutError::Dom(format!("mount({}): {}", selector, js_error(&e))))
    }
}

impl Drop for StripeEmbeddedCheckout {
    fn drop(&mut self) {
        self.inner.destroy();
    }
}
