//! Per-request trace context.
//!
//! Every request gets a trace id and span id, carried through the
//! request extensions so handlers can tag their log lines with it.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct TraceContext {
    pub trace_id: Uuid,
    pub span_id: Uuid,
    pub started_at: Instant,
}

impl TraceContext {
    pub fn new() -> Self {
        Self {
            trace_id: Uuid::new_v4(),
            span_id: Uuid::new_v4(),
            started_at: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.started_at.elapsed().as_millis()
    }
}

impl Default for TraceContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Middleware that attaches a fresh [`TraceContext`] to the request and
/// logs its start and completion.
pub async fn trace_requests(mut request: Request, next: Next) -> Response {
    let context = TraceContext::new();
    let method = request.method().clone();
    let uri = request.uri().clone();

    log::debug!(
        "[{}:{}] Request started: {} {}",
        context.trace_id,
        context.span_id,
        method,
        uri
    );

    request.extensions_mut().insert(context.clone());

    let response = next.run(request).await;

    log::info!(
        "[{}:{}] Request completed: {} {} - Status: {} - Duration: {}ms",
        context.trace_id,
        context.span_id,
        method,
        uri,
        response.status(),
        context.elapsed_ms()
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_context_ids_are_unique() {
        let a = TraceContext::new();
        let b = TraceContext::new();
        assert_ne!(a.trace_id, b.trace_id);
        assert_ne!(a.span_id, b.span_id);
        assert_ne!(a.trace_id, a.span_id);
    }
}
