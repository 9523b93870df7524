//! Low-level wasm-bindgen bindings to the Stripe.js embedded checkout.
//!
//! Only the calls the checkout page makes are bound:
//!
//! ```js
//! const stripe = Stripe("pk_test_...");
//! const checkout = await stripe.initEmbeddedCheckout({ fetchClientSecret });
//! checkout.mount("#checkout");
//! ```

use js_sys::Promise;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Raw Stripe.js client handle.
    #[wasm_bindgen(js_name = Stripe)]
    #[derive(Debug, Clone)]
    pub type JsStripe;

    /// Raw embedded checkout handle.
    #[wasm_bindgen(js_name = EmbeddedCheckout)]
    #[derive(Debug, Clone)]
    pub type JsEmbeddedCheckout;

    /// `Stripe(publishableKey)`; throws if Stripe.js is not loaded.
    #[wasm_bindgen(catch, js_name = Stripe)]
    pub fn new_stripe(publishable_key: &str) -> Result<JsStripe, JsValue>;

    /// `stripe.initEmbeddedCheckout({ fetchClientSecret })` → `Promise<EmbeddedCheckout>`
    #[wasm_bindgen(method, catch, js_name = initEmbeddedCheckout)]
    pub fn init_embedded_checkout(this: &JsStripe, options: &JsValue) -> Result<Promise, JsValue>;

    /// `checkout.mount(selector)`
    #[wasm_bindgen(method, catch)]
    pub fn mount(this: &JsEmbeddedCheckout, selector: &str) -> Result<(), JsValue>;

    /// `checkout.destroy()`
    #[wasm_bindgen(method)]
    pub fn destroy(this: &JsEmbeddedCheckout);
}
