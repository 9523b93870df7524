//! # Configuration
//!
//! Server, Stripe and line-item configuration. Secrets come from environment
//! variables (a `.env` file is honored); line items come from the catalog's
//! `[checkout]` selection.

use crate::catalog::ProductCatalog;
use crate::error::{ServerError, ServerResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Public base URL, used to build the return URL
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Directory holding the wasm-pack output served under `/pkg`
    pub static_dir: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: lookup("BASE_URL").unwrap_or_else(|| "http://localhost:8080".to_string()),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            static_dir: lookup("STATIC_DIR")
                .unwrap_or_else(|| "crates/checkout-wasm/pkg".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> ServerResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ServerError::Configuration(format!("Invalid socket address: {}", e)))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Return page URL handed to the provider; the placeholder is filled in by Stripe
    pub fn return_url(&self) -> String {
        format!(
            "{}/return?session_id={{CHECKOUT_SESSION_ID}}",
            self.base_url.trim_end_matches('/')
        )
    }
}

/// Stripe API configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// Publishable key (pk_test_... or pk_live_...), handed to the pages
    pub publishable_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `STRIPE_SECRET_KEY`
    /// - `STRIPE_PUBLISHABLE_KEY`
    pub fn from_env() -> ServerResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ServerResult<Self> {
        let secret_key = lookup("STRIPE_SECRET_KEY").ok_or_else(|| {
            ServerError::Configuration("STRIPE_SECRET_KEY not set".to_string())
        })?;

        let publishable_key = lookup("STRIPE_PUBLISHABLE_KEY").ok_or_else(|| {
            ServerError::Configuration("STRIPE_PUBLISHABLE_KEY not set".to_string())
        })?;

        if !secret_key.starts_with("sk_test_") && !secret_key.starts_with("sk_live_") {
            return Err(ServerError::Configuration(
                "STRIPE_SECRET_KEY must start with sk_test_ or sk_live_".to_string(),
            ));
        }

        if !publishable_key.starts_with("pk_test_") && !publishable_key.starts_with("pk_live_") {
            return Err(ServerError::Configuration(
                "STRIPE_PUBLISHABLE_KEY must start with pk_test_ or pk_live_".to_string(),
            ));
        }

        Ok(Self::new(secret_key, publishable_key))
    }

    /// Create config with explicit values (for testing)
    pub fn new(secret_key: impl Into<String>, publishable_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            publishable_key: publishable_key.into(),
            api_base_url: "https://api.stripe.com".to_string(),
            api_version: "2024-12-18.acacia".to_string(),
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Checkout mode for created sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMode {
    /// One-time payment
    #[default]
    Payment,
    /// Subscription
    Subscription,
}

impl CheckoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Payment => "payment",
            CheckoutMode::Subscription => "subscription",
        }
    }
}

/// One line item, referencing a Stripe Price
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemConfig {
    /// Stripe Price id (price_...)
    pub price: String,
    pub quantity: u32,
}

/// What every created session sells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutItems {
    pub mode: CheckoutMode,
    pub line_items: Vec<LineItemConfig>,
}

impl CheckoutItems {
    /// Single line item for one price
    pub fn single(price: impl Into<String>) -> Self {
        Self {
            mode: CheckoutMode::Payment,
            line_items: vec![LineItemConfig {
                price: price.into(),
                quantity: 1,
            }],
        }
    }

    pub fn validate(&self) -> ServerResult<()> {
        if self.line_items.is_empty() {
            return Err(ServerError::Configuration(
                "checkout needs at least one line item".to_string(),
            ));
        }
        for item in &self.line_items {
            if !item.price.starts_with("price_") {
                return Err(ServerError::Configuration(format!(
                    "line item price must be a Stripe Price id: {}",
                    item.price
                )));
            }
            if item.quantity == 0 {
                return Err(ServerError::Configuration(format!(
                    "line item {} has zero quantity",
                    item.price
                )));
            }
        }
        Ok(())
    }

    /// Line items for new sessions: `CHECKOUT_PRICE_ID` wins, otherwise the
    /// catalog's `[checkout]` selection.
    pub fn load(catalog: &ProductCatalog) -> ServerResult<Self> {
        Self::from_lookup(catalog, |name| env::var(name).ok())
    }

    fn from_lookup(
        catalog: &ProductCatalog,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ServerResult<Self> {
        if let Some(price) = lookup("CHECKOUT_PRICE_ID") {
            tracing::info!("Using CHECKOUT_PRICE_ID line item");
            let items = Self::single(price);
            items.validate()?;
            return Ok(items);
        }

        let items = catalog.checkout_items()?;
        tracing::info!("Selling {} catalog line items", items.line_items.len());
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(!config.is_production());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig::from_lookup(lookup(&[("HOST", "0.0.0.0"), ("PORT", "3000")]));
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:3000");

        let config = AppConfig::from_lookup(lookup(&[("HOST", "not a host")]));
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_return_url() {
        let config = AppConfig::from_lookup(lookup(&[("BASE_URL", "https://shop.example/")]));
        assert_eq!(
            config.return_url(),
            "https://shop.example/return?session_id={CHECKOUT_SESSION_ID}"
        );
    }

    #[test]
    fn test_stripe_config_validation() {
        let config = StripeConfig::from_lookup(lookup(&[
            ("STRIPE_SECRET_KEY", "sk_test_abc"),
            ("STRIPE_PUBLISHABLE_KEY", "pk_test_xyz"),
        ]))
        .unwrap();
        assert!(config.is_test_mode());
        assert_eq!(config.auth_header(), "Bearer sk_test_abc");

        assert!(StripeConfig::from_lookup(lookup(&[("STRIPE_PUBLISHABLE_KEY", "pk_test_xyz")]))
            .is_err());
        assert!(StripeConfig::from_lookup(lookup(&[
            ("STRIPE_SECRET_KEY", "pk_test_abc"),
            ("STRIPE_PUBLISHABLE_KEY", "pk_test_xyz"),
        ]))
        .is_err());
    }

    #[test]
    fn test_checkout_items_source() {
        let catalog = ProductCatalog::from_toml(
            r#"
            [[categories]]
            id = "clothing"
            name = "Clothing"

            [[items]]
            id = 7
            name = "Scarf"
            amount = 1500
            category = "clothing"
            stripe_price_id = "price_scarf"

            [checkout]
            mode = "subscription"

            [[checkout.line_items]]
            item = 7
            quantity = 3
            "#,
        )
        .unwrap();

        let items = CheckoutItems::from_lookup(&catalog, lookup(&[])).unwrap();
        assert_eq!(items.mode, CheckoutMode::Subscription);
        assert_eq!(items.line_items[0].price, "price_scarf");
        assert_eq!(items.line_items[0].quantity, 3);

        let items =
            CheckoutItems::from_lookup(&catalog, lookup(&[("CHECKOUT_PRICE_ID", "price_env")]))
                .unwrap();
        assert_eq!(items, CheckoutItems::single("price_env"));

        assert!(
            CheckoutItems::from_lookup(&catalog, lookup(&[("CHECKOUT_PRICE_ID", "prod_1")]))
                .is_err()
        );
    }

    #[test]
    fn test_checkout_items_validation() {
        assert!(CheckoutItems::default().validate().is_err());
        assert!(CheckoutItems::single("prod_123").validate().is_err());
        assert!(CheckoutItems::single("price_123").validate().is_ok());
    }
}
