//! # checkout-server
//!
//! Reference server for the embedded-checkout session endpoints.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The two endpoints the checkout and return pages call
//! - The pages themselves, loading the `checkout-wasm` bundle
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Catalog listing |
//! | GET | `/item/{id}` | Item page |
//! | GET | `/health` | Health check |
//! | POST | `/create-checkout-session` | Create embedded session, `{clientSecret}` |
//! | GET | `/session-status?session_id=` | `{status, customer_email}` |
//! | GET | `/checkout` | Checkout page |
//! | GET | `/return` | Return page |

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod provider;
pub mod routes;
pub mod state;
pub mod stripe;

pub use catalog::{CatalogItem, Category, ProductCatalog};
pub use config::{AppConfig, CheckoutItems, StripeConfig};
pub use error::{ServerError, ServerResult};
pub use provider::{CreatedSession, SessionProvider, SessionSnapshot, SharedSessionProvider};
pub use routes::create_router;
pub use state::AppState;
