//! # Product Catalog
//!
//! Read-only shop catalog loaded from `config/catalog.toml`: categories,
//! the items listed on `/` and `/item/{id}`, and the selection of items that
//! every embedded checkout session is created for.

use crate::config::{CheckoutItems, CheckoutMode, LineItemConfig};
use crate::error::{ServerError, ServerResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A group of items on the listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// One item for sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u32,
    pub name: String,
    /// Long description shown on the item page
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Display price in the smallest currency unit. Stripe charges the
    /// amount attached to `stripe_price_id`, not this one.
    pub amount: i64,
    /// Category id
    pub category: String,
    /// Stripe Price id (price_...)
    pub stripe_price_id: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

/// Catalog line item: an item id and a quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogLineItem {
    pub item: u32,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// `[checkout]` table: what the session endpoint sells
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSelection {
    #[serde(default)]
    pub mode: CheckoutMode,
    #[serde(default)]
    pub line_items: Vec<CatalogLineItem>,
}

/// Contents of `config/catalog.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    /// ISO 4217 code used for display prices
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub items: Vec<CatalogItem>,
    #[serde(default)]
    pub checkout: CheckoutSelection,
}

fn default_currency() -> String {
    "usd".to_string()
}

impl ProductCatalog {
    /// Parse and validate a catalog
    pub fn from_toml(toml_str: &str) -> ServerResult<Self> {
        let catalog: ProductCatalog = toml::from_str(toml_str)
            .map_err(|e| ServerError::Configuration(format!("Invalid catalog: {}", e)))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load from the first `config/catalog.toml` found
    pub fn load() -> ServerResult<Self> {
        let config_paths = [
            "config/catalog.toml",
            "../config/catalog.toml",
            "../../config/catalog.toml",
        ];

        for path in config_paths {
            if let Ok(content) = std::fs::read_to_string(path) {
                let catalog = Self::from_toml(&content)
                    .map_err(|e| ServerError::Configuration(format!("{}: {}", path, e)))?;
                tracing::info!(
                    "Loaded {} items in {} categories from {}",
                    catalog.items.len(),
                    catalog.categories.len(),
                    path
                );
                return Ok(catalog);
            }
        }

        Err(ServerError::Configuration(
            "no config/catalog.toml found".to_string(),
        ))
    }

    pub fn validate(&self) -> ServerResult<()> {
        let category_ids: HashSet<&str> = self.categories.iter().map(|c| c.id.as_str()).collect();
        if category_ids.len() != self.categories.len() {
            return Err(ServerError::Configuration(
                "duplicate category id in catalog".to_string(),
            ));
        }

        let mut item_ids = HashSet::new();
        for item in &self.items {
            if !item_ids.insert(item.id) {
                return Err(ServerError::Configuration(format!(
                    "duplicate item id in catalog: {}",
                    item.id
                )));
            }
            if !category_ids.contains(item.category.as_str()) {
                return Err(ServerError::Configuration(format!(
                    "item {} has unknown category {}",
                    item.id, item.category
                )));
            }
            if !item.stripe_price_id.starts_with("price_") {
                return Err(ServerError::Configuration(format!(
                    "item {} stripe_price_id must be a Stripe Price id: {}",
                    item.id, item.stripe_price_id
                )));
            }
            if item.amount < 0 {
                return Err(ServerError::Configuration(format!(
                    "item {} has a negative price",
                    item.id
                )));
            }
        }
        Ok(())
    }

    /// Find an active item by id
    pub fn get(&self, id: u32) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id && item.active)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Active items grouped by category, in catalog order. Empty categories are skipped.
    pub fn by_category(&self) -> Vec<(&Category, Vec<&CatalogItem>)> {
        self.categories
            .iter()
            .map(|category| {
                let items = self
                    .items
                    .iter()
                    .filter(|item| item.active && item.category == category.id)
                    .collect::<Vec<_>>();
                (category, items)
            })
            .filter(|(_, items)| !items.is_empty())
            .collect()
    }

    /// Display price, e.g. `199.00 DKK`
    pub fn display_price(&self, item: &CatalogItem) -> String {
        let zero_decimal = matches!(self.currency.as_str(), "jpy" | "krw");
        if zero_decimal {
            format!("{} {}", item.amount, self.currency.to_uppercase())
        } else {
            format!(
                "{}.{:02} {}",
                item.amount / 100,
                item.amount % 100,
                self.currency.to_uppercase()
            )
        }
    }

    /// Resolve the `[checkout]` selection to Stripe line items
    pub fn checkout_items(&self) -> ServerResult<CheckoutItems> {
        let line_items = self
            .checkout
            .line_items
            .iter()
            .map(|line| {
                let item = self.get(line.item).ok_or_else(|| {
                    ServerError::Configuration(format!(
                        "checkout references unknown or inactive item {}",
                        line.item
                    ))
                })?;
                Ok(LineItemConfig {
                    price: item.stripe_price_id.clone(),
                    quantity: line.quantity,
                })
            })
            .collect::<ServerResult<Vec<_>>>()?;

        let items = CheckoutItems {
            mode: self.checkout.mode,
            line_items,
        };
        items.validate()?;
        Ok(items)
    }
}
