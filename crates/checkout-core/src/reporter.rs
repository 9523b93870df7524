//! # Return Status Reporter
//!
//! Return-page flow. Reads `session_id` from the URL, asks the status endpoint
//! about it, and acts on the provider's answer:
//!
//! | status     | effect                                             |
//! |------------|----------------------------------------------------|
//! | `open`     | replace location with the checkout page            |
//! | `complete` | write `customer_email` into the email element      |
//! | other      | warning in the console, page untouched             |
//!
//! Every failure is caught and logged; nothing reaches the customer and
//! nothing is retried.

use crate::config::CheckoutConfig;
use crate::endpoints::SharedSessionEndpoints;
use crate::error::{CheckoutError, CheckoutResult};
use crate::page::{session_id_from_query, PageContext};
use crate::session::{SessionId, SessionStatus};
use tracing::{error, info, instrument, warn};

/// What a single `report` run did
#[derive(Debug)]
pub enum ReturnOutcome {
    /// No usable `session_id`; no request was made
    MissingSessionId,
    /// Session still open; browser sent back to the checkout page
    RedirectedToCheckout,
    /// Session complete; email written into the page
    CustomerEmailShown { customer_email: String },
    /// Status the flow does not act on
    UnhandledStatus(SessionStatus),
    /// Lookup or page update failed
    Failed(CheckoutError),
}

impl ReturnOutcome {
    /// Short machine-readable label
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnOutcome::MissingSessionId => "missing_session_id",
            ReturnOutcome::RedirectedToCheckout => "redirected_to_checkout",
            ReturnOutcome::CustomerEmailShown { .. } => "customer_email_shown",
            ReturnOutcome::UnhandledStatus(_) => "unhandled_status",
            ReturnOutcome::Failed(_) => "failed",
        }
    }
}

pub struct ReturnStatusReporter<P> {
    page: P,
    endpoints: SharedSessionEndpoints,
    checkout_page_path: String,
    customer_email_element: String,
}

impl<P: PageContext> ReturnStatusReporter<P> {
    pub fn new(page: P, endpoints: SharedSessionEndpoints, config: &CheckoutConfig) -> Self {
        Self {
            page,
            endpoints,
            checkout_page_path: config.checkout_page_path.clone(),
            customer_email_element: config.customer_email_element.clone(),
        }
    }

    /// Run the flow once. Never fails; the outcome says what happened.
    #[instrument(skip(self))]
    pub async fn report(&self) -> ReturnOutcome {
        let Some(session_id) = session_id_from_query(&self.page.query_string()) else {
            error!("{}", CheckoutError::MissingSessionId);
            return ReturnOutcome::MissingSessionId;
        };

        match self.apply_status(&session_id).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!("Error fetching session status: {}", err);
                ReturnOutcome::Failed(err)
            }
        }
    }

    async fn apply_status(&self, session_id: &SessionId) -> CheckoutResult<ReturnOutcome> {
        let session = self.endpoints.session_status(session_id).await?;

        match session.status {
            SessionStatus::Open => {
                info!("Session {} still open, returning to checkout", session_id);
                self.page.replace_location(&self.checkout_page_path)?;
                Ok(ReturnOutcome::RedirectedToCheckout)
            }
            SessionStatus::Complete => {
                let customer_email = session.customer_email.unwrap_or_else(|| {
                    warn!("Session {} complete without customer_email", session_id);
                    String::new()
                });
                self.page
                    .set_text_content(&self.customer_email_element, &customer_email)?;
                info!("Session {} complete", session_id);
                Ok(ReturnOutcome::CustomerEmailShown { customer_email })
            }
            other => {
                warn!("Unhandled session status: {}", other);
                Ok(ReturnOutcome::UnhandledStatus(other))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStatusResponse;
    use crate::testing::{CapturedEvents, FakeEndpoints, FakePage};
    use std::rc::Rc;
    use tracing::Level;

    fn reporter(page: &FakePage, endpoints: &Rc<FakeEndpoints>) -> ReturnStatusReporter<FakePage> {
        ReturnStatusReporter::new(
            page.clone(),
            endpoints.clone(),
            &CheckoutConfig::new("pk_test_abc"),
        )
    }

    fn status(status: &str, email: Option<&str>) -> SessionStatusResponse {
        SessionStatusResponse {
            status: SessionStatus::from(status),
            customer_email: email.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_missing_session_id_makes_no_request() {
        for query in ["", "?", "?foo=bar", "?session_id="] {
            let page = FakePage::new(query);
            let endpoints = Rc::new(FakeEndpoints::with_status(status("complete", Some("x"))));

            let outcome = reporter(&page, &endpoints).report().await;

            assert!(matches!(outcome, ReturnOutcome::MissingSessionId));
            assert_eq!(endpoints.status_calls(), 0);
            assert!(page.texts().is_empty());
            assert!(page.navigations().is_empty());
        }
    }

    #[tokio::test]
    async fn test_missing_session_id_logs_error() {
        let events = CapturedEvents::default();
        let _guard = events.install();
        let page = FakePage::new("?foo=bar");
        let endpoints = Rc::new(FakeEndpoints::with_status(status("open", None)));

        reporter(&page, &endpoints).report().await;

        assert_eq!(
            events.messages(Level::ERROR),
            vec!["No session_id found in URL.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_open_redirects_to_checkout_once() {
        let page = FakePage::new("?session_id=cs_test_1");
        let endpoints = Rc::new(FakeEndpoints::with_status(status("open", None)));

        let outcome = reporter(&page, &endpoints).report().await;

        assert!(matches!(outcome, ReturnOutcome::RedirectedToCheckout));
        assert_eq!(page.navigations(), vec!["/checkout".to_string()]);
        assert!(page.texts().is_empty());
        assert_eq!(endpoints.requested_ids(), vec!["cs_test_1".to_string()]);
    }

    #[tokio::test]
    async fn test_complete_writes_customer_email() {
        let page = FakePage::new("?session_id=cs_test_1");
        let endpoints = Rc::new(FakeEndpoints::with_status(status("complete", Some("a@b.com"))));

        let outcome = reporter(&page, &endpoints).report().await;

        assert!(matches!(
            outcome,
            ReturnOutcome::CustomerEmailShown { ref customer_email } if customer_email == "a@b.com"
        ));
        assert_eq!(
            page.texts(),
            vec![("customer-email".to_string(), "a@b.com".to_string())]
        );
        assert!(page.navigations().is_empty());
    }

    #[tokio::test]
    async fn test_complete_without_email_writes_empty_text() {
        let page = FakePage::new("?session_id=cs_test_1");
        let endpoints = Rc::new(FakeEndpoints::with_status(status("complete", None)));

        reporter(&page, &endpoints).report().await;

        assert_eq!(
            page.texts(),
            vec![("customer-email".to_string(), String::new())]
        );
    }

    #[tokio::test]
    async fn test_unrecognized_status_leaves_page_alone() {
        let events = CapturedEvents::default();
        let _guard = events.install();
        let page = FakePage::new("?session_id=cs_test_1");
        let endpoints = Rc::new(FakeEndpoints::with_status(status("expired", None)));

        let outcome = reporter(&page, &endpoints).report().await;

        match outcome {
            ReturnOutcome::UnhandledStatus(status) => assert_eq!(status.as_str(), "expired"),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(page.texts().is_empty());
        assert!(page.navigations().is_empty());
        assert_eq!(
            events.messages(Level::WARN),
            vec!["Unhandled session status: expired".to_string()]
        );
        assert!(events.messages(Level::ERROR).is_empty());
    }

    #[tokio::test]
    async fn test_lookup_failure_is_caught() {
        let page = FakePage::new("?session_id=cs_test_1");
        let endpoints = Rc::new(FakeEndpoints::failing_status());

        let events = CapturedEvents::default();
        let _guard = events.install();

        let outcome = reporter(&page, &endpoints).report().await;

        assert!(matches!(outcome, ReturnOutcome::Failed(CheckoutError::Network(_))));
        let errors = events.messages(Level::ERROR);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Error fetching session status: "));
        assert!(page.texts().is_empty());
        assert!(page.navigations().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_caught() {
        let page = FakePage::new("?session_id=cs_test_1");
        let endpoints = Rc::new(FakeEndpoints::malformed_status());

        let outcome = reporter(&page, &endpoints).report().await;

        assert!(matches!(
            outcome,
            ReturnOutcome::Failed(CheckoutError::Deserialization(_))
        ));
        assert!(page.texts().is_empty());
        assert!(page.navigations().is_empty());
    }

    #[tokio::test]
    async fn test_missing_element_is_caught() {
        let page = FakePage::without_elements("?session_id=cs_test_1");
        let endpoints = Rc::new(FakeEndpoints::with_status(status("complete", Some("a@b.com"))));

        let outcome = reporter(&page, &endpoints).report().await;

        assert!(matches!(outcome, ReturnOutcome::Failed(CheckoutError::Dom(_))));
        assert_eq!(outcome.as_str(), "failed");
    }
}
