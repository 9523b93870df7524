//! # checkout-core
//!
//! Core types and flows for the embedded-checkout pages.
//!
//! This crate provides:
//! - Wire types for the two checkout endpoints (`CreateSessionResponse`, `SessionStatusResponse`)
//! - `SessionEndpoints`, `EmbeddedCheckoutSdk` and `PageContext` traits at the I/O seams
//! - `ClientSecretProvider`, the repeatable secret-fetching capability the SDK consumes
//! - `CheckoutInitiator` (checkout page) and `ReturnStatusReporter` (return page)
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{CheckoutConfig, CheckoutInitiator, ReturnStatusReporter};
//!
//! let config = CheckoutConfig::new("pk_test_...");
//!
//! // Checkout page
//! let checkout = CheckoutInitiator::new(sdk, endpoints.clone(), &config)
//!     .initialize()
//!     .await?;
//!
//! // Return page
//! let outcome = ReturnStatusReporter::new(page, endpoints, &config).report().await;
//! ```

pub mod config;
pub mod endpoints;
pub mod error;
pub mod initiator;
pub mod page;
pub mod reporter;
pub mod sdk;
pub mod secret;
pub mod session;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use config::CheckoutConfig;
pub use endpoints::{SessionEndpoints, SharedSessionEndpoints};
pub use error::{CheckoutError, CheckoutResult};
pub use initiator::CheckoutInitiator;
pub use page::{session_id_from_query, PageContext, SESSION_ID_PARAM};
pub use reporter::{ReturnOutcome, ReturnStatusReporter};
pub use sdk::{EmbeddedCheckout, EmbeddedCheckoutSdk};
pub use secret::{ClientSecretProvider, SecretFuture};
pub use session::{
    ClientSecret, CreateSessionResponse, SessionId, SessionStatus, SessionStatusResponse,
};
