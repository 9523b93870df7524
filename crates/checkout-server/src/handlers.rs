//! # Request Handlers
//!
//! Axum request handlers for the two session endpoints, the catalog pages,
//! and the pages that host the WebAssembly flows.

use crate::catalog::{CatalogItem, ProductCatalog};
use crate::error::ServerError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use checkout_core::{CreateSessionResponse, SessionId, SessionStatusResponse};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// `GET /session-status` query
#[derive(Debug, Deserialize)]
pub struct SessionStatusQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn server_error_to_response(err: ServerError) -> ApiError {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

/// Checkout session ids are `cs_` plus alphanumerics or `_`; anything else
/// never reaches the provider URL.
fn parse_session_id(raw: Option<String>) -> Result<SessionId, ServerError> {
    let raw = raw.unwrap_or_default();
    if raw.is_empty() {
        return Err(ServerError::InvalidRequest("session_id is required".to_string()));
    }
    let well_formed = raw.strip_prefix("cs_").is_some_and(|rest| {
        !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    });
    if !well_formed {
        return Err(ServerError::InvalidRequest(format!(
            "malformed session_id: {}",
            raw
        )));
    }
    SessionId::new(raw).map_err(|e| ServerError::InvalidRequest(e.to_string()))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "embedded-checkout",
        "provider": state.sessions.provider_name(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// `POST /create-checkout-session`
#[instrument(skip(state))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
) -> Result<Json<CreateSessionResponse>, ApiError> {
    let return_url = state.config.return_url();

    let session = state
        .sessions
        .create_embedded_session(&return_url)
        .await
        .map_err(|e| {
            error!("Failed to create checkout session: {}", e);
            server_error_to_response(e)
        })?;

    info!(
        "Created checkout session: {} (expires {:?})",
        session.session_id,
        session.expires_at.map(|t| t.to_rfc3339())
    );

    Ok(Json(CreateSessionResponse {
        client_secret: session.client_secret,
    }))
}

/// `GET /session-status?session_id=...`
#[instrument(skip(state))]
pub async fn session_status(
    State(state): State<AppState>,
    Query(query): Query<SessionStatusQuery>,
) -> Result<Json<SessionStatusResponse>, ApiError> {
    let session_id = parse_session_id(query.session_id).map_err(server_error_to_response)?;

    let snapshot = state
        .sessions
        .retrieve_session(&session_id)
        .await
        .map_err(|e| {
            error!("Failed to retrieve session {}: {}", session_id, e);
            server_error_to_response(e)
        })?;

    Ok(Json(SessionStatusResponse {
        status: snapshot.status,
        customer_email: snapshot.customer_email,
    }))
}

/// `GET /`: active items grouped by category
pub async fn home_page(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = &state.catalog;
    let mut body = String::from("<h1>Shop</h1>\n");

    let grouped = catalog.by_category();
    if grouped.is_empty() {
        body.push_str("    <p>Nothing for sale yet.</p>\n");
    }
    for (category, items) in grouped {
        body.push_str(&format!(
            "    <section>\n        <h2>{}</h2>\n        <p>{}</p>\n        <ul>\n",
            escape_html(&category.name),
            escape_html(&category.description)
        ));
        for item in items {
            body.push_str(&format!(
                "            <li><a href=\"/item/{}\">{}</a> {}</li>\n",
                item.id,
                escape_html(&item.name),
                escape_html(&catalog.display_price(item))
            ));
        }
        body.push_str("        </ul>\n    </section>\n");
    }

    Html(render_shop_page("Shop", &body))
}

/// `GET /item/{id}`: one item, 404 when unknown or inactive
pub async fn item_page(
    State(state): State<AppState>,
    Path(item_id): Path<u32>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let item = state.catalog.get(item_id).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Html(render_shop_page(
                "Not found",
                "<h1>Item not found</h1>\n    <p><a href=\"/\">Back to the shop</a></p>",
            )),
        )
    })?;

    Ok(Html(render_shop_page(
        &item.name,
        &item_body(&state.catalog, item),
    )))
}

fn item_body(catalog: &ProductCatalog, item: &CatalogItem) -> String {
    let category = catalog
        .category(&item.category)
        .map(|c| c.name.as_str())
        .unwrap_or_default();
    let image = item
        .image_url
        .as_deref()
        .map(|url| {
            format!(
                "<img src=\"{}\" alt=\"{}\" style=\"max-width: 100%;\">\n    ",
                escape_html(url),
                escape_html(&item.name)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<p><a href="/">Shop</a> / {category}</p>
    <h1>{name}</h1>
    {image}<p>{description}</p>
    <p><strong>{price}</strong></p>
    <p><a href="/checkout">Checkout</a></p>"#,
        category = escape_html(category),
        name = escape_html(&item.name),
        description = escape_html(&item.description),
        price = escape_html(&catalog.display_price(item)),
    )
}

/// Checkout page: mounts the embedded checkout into `#checkout`
pub async fn checkout_page(State(state): State<AppState>) -> impl IntoResponse {
    Html(render_page(
        "Checkout",
        r#"<div id="checkout"></div>"#,
        "start_checkout",
        &state.publishable_key,
    ))
}

/// Return page: Stripe sends the customer here with `?session_id=`
pub async fn return_page(State(state): State<AppState>) -> impl IntoResponse {
    Html(render_page(
        "Thank you",
        r#"<section id="success">
        <p>
            We appreciate your business! A confirmation email will be sent to
            <span id="customer-email"></span>.
        </p>
    </section>"#,
        "report_return",
        &state.publishable_key,
    ))
}

fn render_shop_page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
</head>
<body style="font-family: system-ui; margin: 0 auto; max-width: 960px; padding: 40px;">
    {body}
</body>
</html>
"#,
        title = escape_html(title),
    )
}

/// Escape text for HTML element content and quoted attributes
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_page(title: &str, body: &str, entry_point: &str, publishable_key: &str) -> String {
    // JSON-encode so the key lands in the script as a string literal
    let key = serde_json::to_string(publishable_key).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <script src="https://js.stripe.com/v3/"></script>
</head>
<body style="font-family: system-ui; margin: 0 auto; max-width: 960px; padding: 40px;">
    {body}
    <script type="module">
        import init, {{ {entry_point} }} from '/pkg/checkout_wasm.js';
        await init();
        await {entry_point}({{ publishable_key: {key} }});
    </script>
</body>
</html>
"#
    )
}
