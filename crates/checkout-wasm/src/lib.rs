//! # checkout-wasm
//!
//! WebAssembly entry points for the embedded checkout pages.
//!
//! - `start_checkout` runs on the checkout page: it mounts the Stripe
//!   embedded checkout into `#checkout`.
//! - `report_return` runs on the return page: it reads `session_id`, asks
//!   `/session-status`, and redirects or shows the customer email.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { start_checkout, report_return } from './pkg/checkout_wasm.js';
//!
//! await init();
//!
//! // checkout.html (Stripe.js must already be loaded)
//! await start_checkout({ publishable_key: 'pk_test_...' });
//!
//! // return.html
//! await report_return({ publishable_key: 'pk_test_...' });
//! ```
//!
//! Passing `undefined` uses the key baked in at build time from
//! `STRIPE_PUBLISHABLE_KEY`.
//!
//! ## Building
//!
//! ```bash
//! STRIPE_PUBLISHABLE_KEY=pk_test_... wasm-pack build --target web
//! ```

pub mod bindings;
pub mod browser;
pub mod console;
pub mod stripe;

use browser::BrowserPage;
use checkout_client::HttpSessionEndpoints;
use checkout_core::{
    CheckoutConfig, CheckoutError, CheckoutInitiator, CheckoutResult, ReturnStatusReporter,
    SharedSessionEndpoints,
};
use std::cell::RefCell;
use std::rc::Rc;
use stripe::{StripeEmbeddedCheckout, StripeJs};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use wasm_bindgen::prelude::*;

/// Publishable key baked in at build time, if any
const BUILD_PUBLISHABLE_KEY: Option<&str> = option_env!("STRIPE_PUBLISHABLE_KEY");

thread_local! {
    // Keeps the widget (and its secret-fetching closure) alive for the page's lifetime.
    static MOUNTED: RefCell<Option<StripeEmbeddedCheckout>> = const { RefCell::new(None) };
}

/// Initialize the WASM module (called automatically)
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    console::init(level);
}

/// Checkout page entry point.
///
/// Rejects with the error message when session creation, SDK initialization
/// or mounting fails; nothing is shown on the page in that case.
#[wasm_bindgen]
pub async fn start_checkout(config: JsValue) -> Result<(), JsValue> {
    let page = BrowserPage::current().map_err(to_js)?;
    let config = load_config(config, &page).map_err(to_js)?;

    let endpoints: SharedSessionEndpoints =
        Rc::new(HttpSessionEndpoints::new(&config).map_err(to_js)?);
    let sdk = StripeJs::for_page(&config.publishable_key).map_err(to_js)?;

    let checkout = CheckoutInitiator::new(sdk, endpoints, &config)
        .initialize()
        .await
        .map_err(to_js)?;

    MOUNTED.with(|mounted| *mounted.borrow_mut() = Some(checkout));
    Ok(())
}

/// Return page entry point.
///
/// Resolves with the outcome label (`redirected_to_checkout`,
/// `customer_email_shown`, ...). Lookup failures are logged, not rejected;
/// only an unusable configuration rejects.
#[wasm_bindgen]
pub async fn report_return(config: JsValue) -> Result<String, JsValue> {
    let page = BrowserPage::current().map_err(to_js)?;
    let config = load_config(config, &page).map_err(to_js)?;

    let endpoints: SharedSessionEndpoints =
        Rc::new(HttpSessionEndpoints::new(&config).map_err(to_js)?);

    let outcome = ReturnStatusReporter::new(page, endpoints, &config)
        .report()
        .await;
    Ok(outcome.as_str().to_string())
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Config from the JS argument, or from the build-time key when absent.
/// Endpoints default to the page's own origin.
fn load_config(value: JsValue, page: &BrowserPage) -> CheckoutResult<CheckoutConfig> {
    let mut config = if value.is_undefined() || value.is_null() {
        let key = BUILD_PUBLISHABLE_KEY.ok_or_else(|| {
            CheckoutError::Configuration(
                "no config passed and STRIPE_PUBLISHABLE_KEY was not set at build time"
                    .to_string(),
            )
        })?;
        CheckoutConfig::new(key)
    } else {
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| CheckoutError::Configuration(format!("Invalid config: {}", e)))?
    };

    if config.api_base_url.is_none() {
        config.api_base_url = Some(page.origin()?);
    }

    config.validate()?;
    if config.is_test_mode() {
        info!("Using a Stripe test-mode publishable key");
    }
    Ok(config)
}

fn to_js(err: CheckoutError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Best-effort string for a thrown JS value
pub(crate) fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", value))
}
