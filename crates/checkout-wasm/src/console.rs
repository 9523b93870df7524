//! # Console Logging
//!
//! Tracing layer that writes events to the browser developer console,
//! `ERROR` to `console.error`, `WARN` to `console.warn`, the rest to
//! `console.info`/`console.debug`.

use std::fmt::{self, Write as _};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;
use wasm_bindgen::JsValue;

/// Forwards tracing events to `console.*`
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLayer;

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = ConsoleVisitor::default();
        event.record(&mut visitor);

        let metadata = event.metadata();
        let line = JsValue::from_str(&visitor.render(*metadata.level(), metadata.target()));

        match *metadata.level() {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

/// Collects the `message` field and any structured fields of one event
#[derive(Debug, Default)]
struct ConsoleVisitor {
    message: String,
    fields: String,
}

impl ConsoleVisitor {
    fn render(&self, level: Level, target: &str) -> String {
        format!("{} {}: {}{}", level, target, self.message, self.fields)
    }
}

impl Visit for ConsoleVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// Install the console layer as the global subscriber.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init(max_level: LevelFilter) {
    let _ = tracing_subscriber::registry()
        .with(ConsoleLayer.with_filter(max_level))
        .try_init();
}
