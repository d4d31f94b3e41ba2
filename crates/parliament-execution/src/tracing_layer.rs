//! Custom tracing layer for streaming council events to an observer.
//!
//! Captures events emitted by the `parliament*` crates, together with the
//! fields of their enclosing spans, and forwards them over a tokio
//! channel. The CLI uses it for `--trace`.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::span::{Attributes, Id};
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Target prefix of the events forwarded by default.
pub const DEFAULT_TARGET_PREFIX: &str = "parliament";

/// Event data sent to the observer.
#[derive(Debug, Clone, Serialize)]
pub struct CouncilEvent {
    /// Event target (e.g., "parliament_application::deliberation::service")
    pub target: String,
    /// Log level (INFO, DEBUG, WARN, ERROR)
    pub level: String,
    pub message: String,
    /// Structured fields from the event
    pub fields: HashMap<String, Value>,
    /// Fields of the enclosing spans (e.g., meeting_id), outermost first
    pub span: HashMap<String, Value>,
    pub timestamp: String,
}

/// Fields recorded when a span is created.
struct SpanFields(HashMap<String, Value>);

/// A tracing layer that sends council events to a channel.
pub struct CouncilEventLayer {
    sender: mpsc::UnboundedSender<CouncilEvent>,
    target_prefix: String,
}

impl CouncilEventLayer {
    pub fn new(sender: mpsc::UnboundedSender<CouncilEvent>) -> Self {
        Self {
            sender,
            target_prefix: DEFAULT_TARGET_PREFIX.to_string(),
        }
    }

    /// Forwards only events whose target starts with `prefix`.
    pub fn with_target_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.target_prefix = prefix.into();
        self
    }
}

impl<S> Layer<S> for CouncilEventLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            let mut fields = HashMap::new();
            attrs.record(&mut FieldVisitor(&mut fields));
            span.extensions_mut().insert(SpanFields(fields));
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with(&self.target_prefix) {
            return;
        }

        let mut fields = HashMap::new();
        event.record(&mut FieldVisitor(&mut fields));

        let mut span_fields = HashMap::new();
        if let Some(scope) = ctx.event_scope(event) {
            for span in scope.from_root() {
                if let Some(stored) = span.extensions().get::<SpanFields>() {
                    span_fields.extend(stored.0.clone());
                }
            }
        }

        let message = match fields.remove("message") {
            Some(Value::String(text)) => text,
            Some(other) => other.to_string(),
            None => String::new(),
        };

        let council_event = CouncilEvent {
            target: metadata.target().to_string(),
            level: metadata.level().to_string(),
            message,
            fields,
            span: span_fields,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        // Receiver gone means nobody is watching
        let _ = self.sender.send(council_event);
    }
}

/// Field visitor that extracts tracing fields into a HashMap.
struct FieldVisitor<'a>(&'a mut HashMap<String, Value>);

impl tracing::field::Visit for FieldVisitor<'_> {
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(format!("{value:?}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_forwards_council_events_with_span_fields() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let subscriber = tracing_subscriber::registry().with(CouncilEventLayer::new(tx));

        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!(target: "parliament_application", "meeting", meeting_id = "m-1");
            let _entered = span.enter();
            tracing::info!(target: "parliament_application::deliberation", persona = "mouse", score = 7.5, "Idea analyzed");
            tracing::info!(target: "hyper::client", "connection pooled");
        });

        let event = rx.try_recv().expect("council event forwarded");
        assert_eq!(event.message, "Idea analyzed");
        assert_eq!(event.level, "INFO");
        assert_eq!(event.fields["persona"], "mouse");
        assert_eq!(event.fields["score"], 7.5);
        assert_eq!(event.span["meeting_id"], "m-1");
        assert!(rx.try_recv().is_err(), "foreign targets are filtered out");
    }

    #[test]
    fn test_custom_prefix_and_dropped_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let layer = CouncilEventLayer::new(tx).with_target_prefix("parliament_cli");
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "parliament_cli", "nobody listening");
        });
    }
}
