//! # Embedded Checkout Server
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export STRIPE_PUBLISHABLE_KEY=pk_test_...
//!
//! # Build the page bundle, then run the server
//! wasm-pack build crates/checkout-wasm --target web
//! checkout-server
//! ```

use checkout_server::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Session provider: {}", state.sessions.provider_name());
    info!("Catalog: {} items", state.catalog.items.len());
    info!("Serving bundle from {}", state.config.static_dir);

    // Create router
    let app = routes::create_router(state);

    info!("Embedded checkout starting on http://{}", addr);

    if !is_prod {
        info!("Checkout page: http://{}/checkout", addr);
        info!("Create session: POST http://{}/create-checkout-session", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
