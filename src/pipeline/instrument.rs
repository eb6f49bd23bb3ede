//! Span bookkeeping shared by every pipeline.
//!
//! # Responsibilities
//! - Start the request span as a child of the inbound trace context
//! - Wrap each hop in a client span with its elapsed time and deadline
//! - Record hop metrics and failures
//!
//! The tracer is handed in at construction; nothing here reads the global
//! tracer provider, so tests can swap in a recording provider.

use http::HeaderMap;
use opentelemetry::{
    trace::{SpanKind, Status, TraceContextExt, Tracer},
    Context, KeyValue,
};
use std::future::Future;
use std::time::{Duration, Instant};

use crate::lookup::{Hop, LookupError};
use crate::observability::{metrics, propagation};
use crate::observability::propagation::TraceCarrier;
use crate::pipeline::error::PipelineError;
use crate::resilience::timeouts;

pub struct RequestTracer<T> {
    tracer: T,
    carrier: TraceCarrier,
    span_name: String,
}

impl<T> RequestTracer<T>
where
    T: Tracer + Send + Sync,
    T::Span: Send + Sync + 'static,
{
    pub fn new(tracer: T, span_name: impl Into<String>) -> Self {
        Self {
            tracer,
            carrier: TraceCarrier::new(),
            span_name: span_name.into(),
        }
    }

    /// Start the request span. Its parent is whatever trace context the
    /// inbound headers carry; without one the span is a new root.
    pub fn start_request(&self, headers: &HeaderMap) -> Context {
        let parent = self.carrier.extract(headers);
        let span = self
            .tracer
            .span_builder(self.span_name.clone())
            .with_kind(SpanKind::Server)
            .start_with_context(&self.tracer, &parent);
        parent.with_span(span)
    }

    /// Close the request span, marking it failed if `outcome` is an error.
    pub fn finish_request<R>(&self, cx: &Context, outcome: &Result<R, PipelineError>) {
        let span = cx.span();
        if let Err(e) = outcome {
            span.set_status(Status::error(e.to_string()));
            if let Some(hop) = e.hop() {
                span.set_attribute(KeyValue::new("error.hop", hop.as_str()));
            }
        }
        span.end();
    }

    /// Run one hop inside a client span, bounded by `deadline`.
    ///
    /// `call` receives the hop's context, which the lookup client injects
    /// into its outbound headers.
    pub async fn hop<R, F, Fut>(
        &self,
        hop: Hop,
        deadline: Duration,
        cx: &Context,
        call: F,
    ) -> Result<R, PipelineError>
    where
        F: FnOnce(Context) -> Fut,
        Fut: Future<Output = Result<R, LookupError>>,
    {
        let span = self
            .tracer
            .span_builder(format!("{hop}-lookup"))
            .with_kind(SpanKind::Client)
            .start_with_context(&self.tracer, cx);
        let hop_cx = cx.with_span(span);

        let started = Instant::now();
        let result = timeouts::bounded(hop, deadline, call(hop_cx.clone())).await;
        let elapsed = started.elapsed();

        let span = hop_cx.span();
        span.set_attribute(KeyValue::new("hop.elapsed_ms", elapsed.as_millis() as i64));
        span.set_attribute(KeyValue::new("hop.deadline_ms", deadline.as_millis() as i64));

        match &result {
            Ok(_) => {
                metrics::record_hop(hop, "ok", elapsed);
                tracing::debug!(hop = %hop, elapsed_ms = elapsed.as_millis() as u64, "Hop completed");
            }
            Err(e) => {
                metrics::record_hop(hop, outcome_label(e), elapsed);
                span.set_status(Status::error(e.to_string()));
                tracing::warn!(
                    hop = %hop,
                    trace_id = %propagation::trace_id(cx).unwrap_or_default(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "Hop failed"
                );
            }
        }
        span.end();

        result
    }
}

fn outcome_label(err: &PipelineError) -> &'static str {
    match err {
        PipelineError::NotFound => "not_found",
        PipelineError::Timeout { .. } => "timeout",
        PipelineError::Upstream { .. } => "error",
        PipelineError::Validation(_) => "invalid",
    }
}
