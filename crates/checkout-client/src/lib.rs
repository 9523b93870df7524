//! # checkout-client
//!
//! HTTP implementation of the checkout session endpoints for embedded-checkout-rs.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_client::HttpSessionEndpoints;
//! use checkout_core::{CheckoutConfig, SessionEndpoints};
//!
//! let config = CheckoutConfig::new("pk_test_...").with_api_base_url("https://shop.example");
//! let endpoints = HttpSessionEndpoints::new(&config)?;
//!
//! let created = endpoints.create_checkout_session().await?;
//! ```

pub mod http;

pub use http::HttpSessionEndpoints;
