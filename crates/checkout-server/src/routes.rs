//! # Routes
//!
//! Axum router for the reference server.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Create the main application router
///
/// Routes:
/// - Session endpoints:
///   - POST /create-checkout-session - Create an embedded session, returns `{clientSecret}`
///   - GET  /session-status?session_id= - Session status and customer email
///
/// - Pages:
///   - GET / - Catalog listing
///   - GET /item/{id} - Item page
///   - GET /checkout - Checkout page (mount point `#checkout`)
///   - GET /return - Return page (`#customer-email`)
///   - GET /pkg/* - WebAssembly bundle
///
/// - GET /health - Health check
pub fn create_router(state: AppState) -> Router {
    let pkg = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(handlers::health))
        // Session endpoints
        .route(
            "/create-checkout-session",
            post(handlers::create_checkout_session),
        )
        .route("/session-status", get(handlers::session_status))
        // Pages
        .route("/", get(handlers::home_page))
        .route("/item/{id}", get(handlers::item_page))
        .route("/checkout", get(handlers::checkout_page))
        .route("/return", get(handlers::return_page))
        .nest_service("/pkg", pkg)
        // Middleware
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
