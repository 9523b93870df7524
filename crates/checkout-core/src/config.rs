//! # Checkout Configuration
//!
//! Page-side configuration: the publishable key used to instantiate the
//! payment SDK, plus the endpoint paths and element ids both flows rely on.

use crate::error::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CREATE_SESSION_PATH: &str = "/create-checkout-session";
pub const DEFAULT_SESSION_STATUS_PATH: &str = "/session-status";
pub const DEFAULT_CHECKOUT_PAGE_PATH: &str = "/checkout";
pub const DEFAULT_MOUNT_SELECTOR: &str = "#checkout";
pub const DEFAULT_CUSTOMER_EMAIL_ELEMENT: &str = "customer-email";

/// Configuration shared by the checkout initiator and the return reporter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Publishable key (pk_test_... or pk_live_...)
    pub publishable_key: String,

    /// Origin the endpoint paths are resolved against (e.g. `https://shop.example`).
    /// `None` means "the page's own origin".
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Session-creation endpoint path
    #[serde(default = "default_create_session_path")]
    pub create_session_path: String,

    /// Session-status endpoint path
    #[serde(default = "default_session_status_path")]
    pub session_status_path: String,

    /// Where an `open` session sends the browser back to
    #[serde(default = "default_checkout_page_path")]
    pub checkout_page_path: String,

    /// CSS selector the embedded widget is mounted into
    #[serde(default = "default_mount_selector")]
    pub mount_selector: String,

    /// Element id that receives the customer email on the return page
    #[serde(default = "default_customer_email_element")]
    pub customer_email_element: String,
}

fn default_create_session_path() -> String {
    DEFAULT_CREATE_SESSION_PATH.to_string()
}

fn default_session_status_path() -> String {
    DEFAULT_SESSION_STATUS_PATH.to_string()
}

fn default_checkout_page_path() -> String {
    DEFAULT_CHECKOUT_PAGE_PATH.to_string()
}

fn default_mount_selector() -> String {
    DEFAULT_MOUNT_SELECTOR.to_string()
}

fn default_customer_email_element() -> String {
    DEFAULT_CUSTOMER_EMAIL_ELEMENT.to_string()
}

impl CheckoutConfig {
    /// Create config with default paths and element ids
    pub fn new(publishable_key: impl Into<String>) -> Self {
        Self {
            publishable_key: publishable_key.into(),
            api_base_url: None,
            create_session_path: default_create_session_path(),
            session_status_path: default_session_status_path(),
            checkout_page_path: default_checkout_page_path(),
            mount_selector: default_mount_selector(),
            customer_email_element: default_customer_email_element(),
        }
    }

    /// Builder: resolve endpoints against an explicit origin
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Builder: set the checkout page an `open` session redirects to
    pub fn with_checkout_page_path(mut self, path: impl Into<String>) -> Self {
        self.checkout_page_path = path.into();
        self
    }

    /// Builder: set the mount selector
    pub fn with_mount_selector(mut self, selector: impl Into<String>) -> Self {
        self.mount_selector = selector.into();
        self
    }

    /// Validate the key format and that every path is absolute.
    pub fn validate(&self) -> CheckoutResult<()> {
        if !self.publishable_key.starts_with("pk_test_")
            && !self.publishable_key.starts_with("pk_live_")
        {
            return Err(CheckoutError::Configuration(
                "publishable key must start with pk_test_ or pk_live_".to_string(),
            ));
        }

        for (name, path) in [
            ("create_session_path", &self.create_session_path),
            ("session_status_path", &self.session_status_path),
            ("checkout_page_path", &self.checkout_page_path),
        ] {
            if !path.starts_with('/') {
                return Err(CheckoutError::Configuration(format!(
                    "{} must start with '/': {}",
                    name, path
                )));
            }
        }

        if self.mount_selector.is_empty() || self.customer_email_element.is_empty() {
            return Err(CheckoutError::Configuration(
                "mount selector and customer email element must be non-empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Check if using a test key
    pub fn is_test_mode(&self) -> bool {
        self.publishable_key.starts_with("pk_test_")
    }

    /// Resolve an endpoint path against `api_base_url` (or leave it relative)
    pub fn endpoint_url(&self, path: &str) -> String {
        match &self.api_base_url {
            Some(base) => format!("{}{}", base.trim_end_matches('/'), path),
            None => path.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckoutConfig::new("pk_test_abc");
        assert_eq!(config.create_session_path, "/create-checkout-session");
        assert_eq!(config.session_status_path, "/session-status");
        assert_eq!(config.checkout_page_path, "/checkout");
        assert_eq!(config.mount_selector, "#checkout");
        assert_eq!(config.customer_email_element, "customer-email");
        assert!(config.validate().is_ok());
        assert!(config.is_test_mode());
    }

    #[test]
    fn test_key_validation() {
        assert!(CheckoutConfig::new("pk_live_abc").validate().is_ok());
        assert!(matches!(
            CheckoutConfig::new("sk_test_abc").validate(),
            Err(CheckoutError::Configuration(_))
        ));
        assert!(CheckoutConfig::new("").validate().is_err());
    }

    #[test]
    fn test_relative_path_rejected() {
        let config = CheckoutConfig::new("pk_test_abc").with_checkout_page_path("checkout");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: CheckoutConfig =
            serde_json::from_str(r#"{"publishable_key":"pk_test_abc","checkout_page_path":"/buy"}"#)
                .unwrap();
        assert_eq!(config.checkout_page_path, "/buy");
        assert_eq!(config.session_status_path, "/session-status");
    }

    #[test]
    fn test_endpoint_url() {
        let config = CheckoutConfig::new("pk_test_abc");
        assert_eq!(config.endpoint_url("/session-status"), "/session-status");

        let config = config.with_api_base_url("https://shop.example/");
        assert_eq!(
            config.endpoint_url("/session-status"),
            "https://shop.example/session-status"
        );
    }
}
