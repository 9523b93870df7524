//! # HTTP Session Endpoints
//!
//! `SessionEndpoints` over HTTP. Compiles for the browser (reqwest's fetch
//! backend) and for native targets.
//!
//! No timeout and no retry: a hung request leaves the page waiting.

use async_trait::async_trait;
use checkout_core::{
    CheckoutConfig, CheckoutError, CheckoutResult, CreateSessionResponse, SessionEndpoints,
    SessionId, SessionStatusResponse, SESSION_ID_PARAM,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

/// HTTP implementation of the two checkout endpoints
#[derive(Debug, Clone)]
pub struct HttpSessionEndpoints {
    client: Client,
    create_session_url: Url,
    session_status_url: Url,
}

impl HttpSessionEndpoints {
    /// Build from config. `api_base_url` must be set to an absolute origin.
    pub fn new(config: &CheckoutConfig) -> CheckoutResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| CheckoutError::Configuration(format!("HTTP client: {}", e)))?;

        Self::with_client(client, config)
    }

    /// Build with a caller-supplied client
    pub fn with_client(client: Client, config: &CheckoutConfig) -> CheckoutResult<Self> {
        Ok(Self {
            client,
            create_session_url: absolute_url(&config.endpoint_url(&config.create_session_path))?,
            session_status_url: absolute_url(&config.endpoint_url(&config.session_status_path))?,
        })
    }

    /// Read the body, map non-2xx to `HttpStatus`, and decode JSON.
    async fn decode<T: DeserializeOwned>(
        endpoint: &Url,
        response: reqwest::Response,
    ) -> CheckoutResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        if !status.is_success() {
            debug!("Endpoint error: url={}, status={}", endpoint, status);
            return Err(CheckoutError::HttpStatus {
                endpoint: endpoint.path().to_string(),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            CheckoutError::Deserialization(format!(
                "Failed to parse response from {}: {}",
                endpoint.path(),
                e
            ))
        })
    }
}

fn absolute_url(raw: &str) -> CheckoutResult<Url> {
    Url::parse(raw).map_err(|e| {
        CheckoutError::Configuration(format!("endpoint URL {:?} is not absolute: {}", raw, e))
    })
}

#[async_trait(?Send)]
impl SessionEndpoints for HttpSessionEndpoints {
    #[instrument(skip(self))]
    async fn create_checkout_session(&self) -> CheckoutResult<CreateSessionResponse> {
        debug!("POST {}", self.create_session_url);

        let response = self
            .client
            .post(self.create_session_url.clone())
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        Self::decode(&self.create_session_url, response).await
    }

    #[instrument(skip(self, session_id), fields(session_id = %session_id))]
    async fn session_status(
        &self,
        session_id: &SessionId,
    ) -> CheckoutResult<SessionStatusResponse> {
        debug!("GET {}", self.session_status_url);

        let response = self
            .client
            .get(self.session_status_url.clone())
            .query(&[(SESSION_ID_PARAM, session_id.as_str())])
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        Self::decode(&self.session_status_url, response).await
    }
}
