//! Server-side spans for inbound requests
//!
//! Each handled request gets one `tracing` span carrying the W3C trace and
//! span ids. The trace is continued from an inbound `traceparent` header
//! when the caller sent one.

use axum::http::HeaderMap;
use pets_core::{TraceContext, TRACEPARENT_HEADER};
use tracing::field::Empty;
use tracing::Span;

/// Error kind recorded when no backend contributed to an aggregate
pub const GLOBAL_FAILURE_KIND: &str = "global failure";

/// Message recorded alongside [`GLOBAL_FAILURE_KIND`]
pub const GLOBAL_FAILURE_MESSAGE: &str = "pet service unavailable";

/// One server span per inbound request
pub struct ServerSpan {
    span: Span,
    context: TraceContext,
    parent: Option<TraceContext>,
}

impl ServerSpan {
    /// Open a span for `operation`, continuing any trace found in `headers`
    pub fn start(operation: &'static str, headers: &HeaderMap) -> Self {
        let parent = headers
            .get(TRACEPARENT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(TraceContext::from_traceparent);

        let context = match &parent {
            Some(parent) => parent.child(),
            None => TraceContext::new_root(),
        };

        let span = tracing::info_span!(
            "server",
            operation,
            trace_id = %context.trace_id_hex(),
            span_id = %context.span_id_hex(),
            parent_id = Empty,
            error = Empty,
            error.kind = Empty,
            message = Empty,
        );
        if let Some(parent) = &parent {
            span.record("parent_id", parent.span_id_hex().as_str());
        }

        Self {
            span,
            context,
            parent,
        }
    }

    /// Context of this span
    pub fn context(&self) -> &TraceContext {
        &self.context
    }

    /// Context continued from the caller, if any
    pub fn parent(&self) -> Option<&TraceContext> {
        self.parent.as_ref()
    }

    /// Context to inject into outbound calls, `None` when tracing is off
    pub fn outbound(&self, tracing_enabled: bool) -> Option<&TraceContext> {
        tracing_enabled.then_some(&self.context)
    }

    /// The underlying `tracing` span
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Tag the span as failed
    pub fn record_error(&self, kind: &str, message: &str) {
        self.span.record("error", true);
        self.span.record("error.kind", kind);
        self.span.record("message", message);
        tracing::error!(parent: &self.span, error.kind = kind, reason = message, "Request failed");
    }
}
