//! # Browser Page
//!
//! `PageContext` over the live `window`/`document`.

use crate::js_error;
use checkout_core::{CheckoutError, CheckoutResult, PageContext};
use web_sys::{Document, Window};

pub struct BrowserPage {
    window: Window,
    document: Document,
}

impl BrowserPage {
    /// Page the module is running in
    pub fn current() -> CheckoutResult<Self> {
        let window =
            web_sys::window().ok_or_else(|| CheckoutError::Dom("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| CheckoutError::Dom("no document".to_string()))?;
        Ok(Self { window, document })
    }

    /// `location.origin`, used to resolve the endpoint paths
    pub fn origin(&self) -> CheckoutResult<String> {
        self.window
            .location()
            .origin()
            .map_err(|e| CheckoutError::Dom(js_error(&e)))
    }
}

impl PageContext for BrowserPage {
    fn query_string(&self) -> String {
        self.window.location().search().unwrap_or_default()
    }

    fn set_text_content(&self, element_id: &str, text: &str) -> CheckoutResult<()> {
        let element = self
            .document
            .get_element_by_id(element_id)
            .ok_or_else(|| CheckoutError::Dom(format!("element #{} not found", element_id)))?;
        element.set_text_content(Some(text));
        Ok(())
    }

    fn replace_location(&self, url: &str) -> CheckoutResult<()> {
        self.window
            .location()
            .replace(url)
            .map_err(|e| CheckoutError::Dom(js_error(&e)))
    }
}
