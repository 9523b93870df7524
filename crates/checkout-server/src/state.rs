//! # Application State
//!
//! Shared state for the Axum application: the session provider, the catalog
//! and config.

use crate::catalog::ProductCatalog;
use crate::config::{AppConfig, CheckoutItems, StripeConfig};
use crate::provider::SharedSessionProvider;
use crate::stripe::StripeSessionProvider;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment provider owning the sessions
    pub sessions: SharedSessionProvider,
    /// Items listed on the shop pages
    pub catalog: Arc<ProductCatalog>,
    /// Publishable key rendered into the pages
    pub publishable_key: String,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by Stripe
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let stripe_config = StripeConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load Stripe config: {}", e))?;
        let catalog = ProductCatalog::load()
            .map_err(|e| anyhow::anyhow!("Failed to load catalog: {}", e))?;
        let items = CheckoutItems::load(&catalog)
            .map_err(|e| anyhow::anyhow!("Failed to load checkout items: {}", e))?;

        if !stripe_config.is_test_mode() && !config.is_production() {
            tracing::warn!("Live Stripe keys in a non-production environment");
        }

        let publishable_key = stripe_config.publishable_key.clone();
        let provider = StripeSessionProvider::new(stripe_config, items)
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        Ok(Self::with_provider(Arc::new(provider), publishable_key, config).with_catalog(catalog))
    }

    /// Assemble state around any provider
    pub fn with_provider(
        sessions: SharedSessionProvider,
        publishable_key: impl Into<String>,
        config: AppConfig,
    ) -> Self {
        Self {
            sessions,
            catalog: Arc::new(ProductCatalog::default()),
            publishable_key: publishable_key.into(),
            config,
        }
    }

    /// Builder: serve this catalog on the shop pages
    pub fn with_catalog(mut self, catalog: ProductCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }
}
