//! Trace context propagation across the asynchronous web request boundary.
//!
//! A fetch is issued in one `update` call and its result arrives in a later one.
//! The current span's trace and span ids travel inside the request context so the
//! span handling the response can be parented to the span that issued it.

use serde::{Deserialize, Serialize};

/// Serialized OpenTelemetry trace position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the issuing span.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace context of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is invalid, which is the normal case in tests.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Rebuilds the OpenTelemetry context with the issuing span as remote parent.
    ///
    /// Returns `None` if the ids are not valid hex.
    #[must_use]
    pub fn to_otel_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }

    /// Parents `span` to the span that issued the request.
    pub fn adopt(&self, span: &tracing::Span) {
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        if let Some(context) = self.to_otel_context() {
            span.set_parent(context);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_context_without_otel_layer() {
        assert!(TraceContext::from_current().is_none());
    }

    #[test]
    fn malformed_ids_are_rejected() {
        let context = TraceContext {
            trace_id: "not-hex".to_string(),
            parent_span_id: "also-not-hex".to_string(),
        };
        assert!(context.to_otel_context().is_none());
    }

    #[test]
    fn valid_ids_become_remote_parent() {
        use opentelemetry::trace::TraceContextExt;

        let context = TraceContext {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };
        let otel = context.to_otel_context().unwrap();
        let span = otel.span();
        let span_context = span.span_context();
        assert!(span_context.is_remote());
        assert_eq!(format!("{:016x}", span_context.span_id()), "00f067aa0ba902b7");
    }
}
