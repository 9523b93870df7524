//! # Stripe Embedded Checkout Sessions
//!
//! `SessionProvider` over the Stripe Checkout Sessions API with
//! `ui_mode=embedded`: the session's client secret goes to the browser
//! widget, and Stripe sends the customer back to the return URL.

use crate::config::{CheckoutItems, StripeConfig};
use crate::error::{ServerError, ServerResult};
use crate::provider::{CreatedSession, SessionProvider, SessionSnapshot};
use async_trait::async_trait;
use checkout_core::{ClientSecret, SessionId, SessionStatus};
use chrono::DateTime;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

pub struct StripeSessionProvider {
    config: StripeConfig,
    items: CheckoutItems,
    client: Client,
}

impl StripeSessionProvider {
    pub fn new(config: StripeConfig, items: CheckoutItems) -> ServerResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ServerError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            config,
            items,
            client,
        })
    }

    /// Form fields for `POST /v1/checkout/sessions`
    fn session_form(&self, return_url: &str) -> Vec<(String, String)> {
        let mut form_params: Vec<(String, String)> = vec![
            ("ui_mode".to_string(), "embedded".to_string()),
            ("mode".to_string(), self.items.mode.as_str().to_string()),
            ("return_url".to_string(), return_url.to_string()),
        ];

        for (i, item) in self.items.line_items.iter().enumerate() {
            form_params.push((format!("line_items[{}][price]", i), item.price.clone()));
            form_params.push((
                format!("line_items[{}][quantity]", i),
                item.quantity.to_string(),
            ));
        }

        form_params
    }

    /// Decode a Stripe response, turning error bodies into `ServerError`.
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        session_id: Option<&SessionId>,
    ) -> ServerResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ServerError::Network(e.to_string()))?;

        if status == StatusCode::NOT_FOUND {
            if let Some(id) = session_id {
                return Err(ServerError::SessionNotFound {
                    session_id: id.to_string(),
                });
            }
        }

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(ServerError::Provider {
                    provider: "stripe".to_string(),
                    message: error_response.error.message,
                });
            }

            return Err(ServerError::Provider {
                provider: "stripe".to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            ServerError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })
    }
}

#[async_trait]
impl SessionProvider for StripeSessionProvider {
    #[instrument(skip(self))]
    async fn create_embedded_session(&self, return_url: &str) -> ServerResult<CreatedSession> {
        let form_params = self.session_form(return_url);
        let idempotency_key = Uuid::new_v4().to_string();

        debug!(
            "Creating embedded checkout session: {} items, mode={}",
            self.items.line_items.len(),
            self.items.mode.as_str()
        );

        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .header("Idempotency-Key", &idempotency_key)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| ServerError::Network(e.to_string()))?;

        let session: StripeSessionResponse = Self::decode(response, None).await?;

        let client_secret = session.client_secret.ok_or_else(|| {
            ServerError::Serialization("Stripe session has no client_secret".to_string())
        })?;

        info!("Created embedded checkout session: id={}", session.id);

        Ok(CreatedSession {
            session_id: session.id,
            client_secret: ClientSecret::new(client_secret),
            expires_at: session
                .expires_at
                .and_then(|ts| DateTime::from_timestamp(ts, 0)),
        })
    }

    #[instrument(skip(self, session_id), fields(session_id = %session_id))]
    async fn retrieve_session(&self, session_id: &SessionId) -> ServerResult<SessionSnapshot> {
        let url = format!(
            "{}/v1/checkout/sessions/{}",
            self.config.api_base_url,
            session_id.as_str()
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .send()
            .await
            .map_err(|e| ServerError::Network(e.to_string()))?;

        let session: StripeSessionResponse = Self::decode(response, Some(session_id)).await?;
        let status = session
            .status
            .map(SessionStatus::from)
            .unwrap_or_else(|| SessionStatus::Other(String::new()));

        debug!("Retrieved session {}: status={}", session.id, status);

        Ok(SessionSnapshot {
            status,
            customer_email: session.customer_details.and_then(|d| d.email),
        })
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeSessionResponse {
    id: String,
    #[serde(default)]
    client_secret: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    customer_details: Option<StripeCustomerDetails>,
    #[serde(default)]
    expires_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StripeCustomerDetails {
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}
