//! In-memory fakes for the flow tests.

use crate::endpoints::SessionEndpoints;
use crate::error::{CheckoutError, CheckoutResult};
use crate::page::PageContext;
use crate::sdk::{EmbeddedCheckout, EmbeddedCheckoutSdk};
use crate::secret::ClientSecretProvider;
use crate::session::{CreateSessionResponse, SessionId, SessionStatusResponse};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

type ErrorFn = fn() -> CheckoutError;

fn network_down() -> CheckoutError {
    CheckoutError::Network("connection refused".to_string())
}

fn malformed_body() -> CheckoutError {
    CheckoutError::Deserialization("expected value at line 1 column 1".to_string())
}

#[derive(Default)]
pub struct FakeEndpoints {
    secret: Option<String>,
    status: Option<SessionStatusResponse>,
    create_error: Option<ErrorFn>,
    status_error: Option<ErrorFn>,
    create_calls: Cell<usize>,
    requested_ids: RefCell<Vec<String>>,
}

impl FakeEndpoints {
    pub fn with_secret(secret: &str) -> Self {
        Self {
            secret: Some(secret.to_string()),
            ..Self::default()
        }
    }

    pub fn with_status(status: SessionStatusResponse) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn failing_create() -> Self {
        Self {
            create_error: Some(network_down),
            ..Self::default()
        }
    }

    pub fn failing_status() -> Self {
        Self {
            status_error: Some(network_down),
            ..Self::default()
        }
    }

    pub fn malformed_status() -> Self {
        Self {
            status_error: Some(malformed_body),
            ..Self::default()
        }
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.get()
    }

    pub fn status_calls(&self) -> usize {
        self.requested_ids.borrow().len()
    }

    pub fn requested_ids(&self) -> Vec<String> {
        self.requested_ids.borrow().clone()
    }
}

#[async_trait(?Send)]
impl SessionEndpoints for FakeEndpoints {
    async fn create_checkout_session(&self) -> CheckoutResult<CreateSessionResponse> {
        self.create_calls.set(self.create_calls.get() + 1);
        if let Some(err) = self.create_error {
            return Err(err());
        }
        let secret = self
            .secret
            .clone()
            .ok_or_else(|| CheckoutError::Deserialization("missing field `clientSecret`".into()))?;
        Ok(CreateSessionResponse::new(secret))
    }

    async fn session_status(
        &self,
        session_id: &SessionId,
    ) -> CheckoutResult<SessionStatusResponse> {
        self.requested_ids
            .borrow_mut()
            .push(session_id.as_str().to_string());
        if let Some(err) = self.status_error {
            return Err(err());
        }
        self.status
            .clone()
            .ok_or_else(|| CheckoutError::Deserialization("missing field `status`".into()))
    }
}

#[derive(Debug, Default)]
struct SdkLog {
    init_calls: usize,
    secrets_seen: Vec<String>,
    mounts: Vec<String>,
}

/// SDK stand-in: resolves the secret provider once during init, like the
/// real SDK does before rendering.
#[derive(Clone, Default)]
pub struct FakeSdk {
    log: Rc<RefCell<SdkLog>>,
    fail_mount: bool,
}

impl FakeSdk {
    pub fn failing_mount() -> Self {
        Self {
            fail_mount: true,
            ..Self::default()
        }
    }

    pub fn init_calls(&self) -> usize {
        self.log.borrow().init_calls
    }

    pub fn secrets_seen(&self) -> Vec<String> {
        self.log.borrow().secrets_seen.clone()
    }

    pub fn mounts(&self) -> Vec<String> {
        self.log.borrow().mounts.clone()
    }
}

#[derive(Debug)]
pub struct FakeCheckout {
    log: Rc<RefCell<SdkLog>>,
    fail_mount: bool,
}

#[async_trait(?Send)]
impl EmbeddedCheckoutSdk for FakeSdk {
    type Checkout = FakeCheckout;

    async fn init_embedded_checkout(
        &self,
        fetch_client_secret: ClientSecretProvider,
    ) -> CheckoutResult<FakeCheckout> {
        self.log.borrow_mut().init_calls += 1;
        let secret = fetch_client_secret.fetch().await?;
        self.log
            .borrow_mut()
            .secrets_seen
            .push(secret.into_inner());
        Ok(FakeCheckout {
            log: self.log.clone(),
            fail_mount: self.fail_mount,
        })
    }
}

impl EmbeddedCheckout for FakeCheckout {
    fn mount(&self, selector: &str) -> CheckoutResult<()> {
        if self.fail_mount {
            return Err(CheckoutError::Dom(format!("no element matches {}", selector)));
        }
        self.log.borrow_mut().mounts.push(selector.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct PageLog {
    texts: Vec<(String, String)>,
    navigations: Vec<String>,
}

#[derive(Clone)]
pub struct FakePage {
    query: String,
    has_elements: bool,
    log: Rc<RefCell<PageLog>>,
}

impl FakePage {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            has_elements: true,
            log: Rc::default(),
        }
    }

    pub fn without_elements(query: &str) -> Self {
        Self {
            has_elements: false,
            ..Self::new(query)
        }
    }

    pub fn texts(&self) -> Vec<(String, String)> {
        self.log.borrow().texts.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.log.borrow().navigations.clone()
    }
}

impl PageContext for FakePage {
    fn query_string(&self) -> String {
        self.query.clone()
    }

    fn set_text_content(&self, element_id: &str, text: &str) -> CheckoutResult<()> {
        if !self.has_elements {
            return Err(CheckoutError::Dom(format!("element #{} not found", element_id)));
        }
        self.log
            .borrow_mut()
            .texts
            .push((element_id.to_string(), text.to_string()));
        Ok(())
    }

    fn replace_location(&self, url: &str) -> CheckoutResult<()> {
        self.log.borrow_mut().navigations.push(url.to_string());
        Ok(())
    }
}

/// Records the level and message of every event on the current thread.
#[derive(Clone, Default)]
pub struct CapturedEvents {
    events: Arc<Mutex<Vec<(Level, String)>>>,
}

impl CapturedEvents {
    /// Capture until the returned guard is dropped.
    pub fn install(&self) -> DefaultGuard {
        tracing::subscriber::set_default(tracing_subscriber::registry().with(self.clone()))
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for CapturedEvents {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.events
            .lock()
            .unwrap()
            .push((*event.metadata().level(), visitor.message));
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }
}
