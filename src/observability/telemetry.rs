//! OpenTelemetry tracer provider setup.
//!
//! # Responsibilities
//! - Build the tracer provider (OTLP gRPC batch export when enabled)
//! - Hand out tracers for explicit injection into pipelines
//! - Flush pending spans on shutdown
//!
//! With export disabled the provider still creates real spans, so trace
//! context keeps propagating across hops; they are simply not shipped.

use opentelemetry::{trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    trace::{Sampler, SdkTracerProvider},
    Resource,
};
use thiserror::Error;

use crate::config::schema::ObservabilityConfig;

/// Tracer type handed to the pipelines.
pub type ServiceTracer = opentelemetry_sdk::trace::SdkTracer;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to build span exporter: {0}")]
    Exporter(String),
}

pub struct Telemetry {
    provider: SdkTracerProvider,
}

impl Telemetry {
    pub fn init(config: &ObservabilityConfig, service_name: &str) -> Result<Self, TelemetryError> {
        let resource = Resource::builder_empty()
            .with_attributes([KeyValue::new("service.name", service_name.to_string())])
            .build();

        let mut builder = SdkTracerProvider::builder()
            .with_sampler(Sampler::ParentBased(Box::new(Sampler::AlwaysOn)))
            .with_resource(resource);

        if config.otel_enabled {
            let exporter = opentelemetry_otlp::SpanExporter::builder()
                .with_tonic()
                .with_endpoint(config.otel_endpoint.clone())
                .build()
                .map_err(|e| TelemetryError::Exporter(e.to_string()))?;
            builder = builder.with_batch_exporter(exporter);
            tracing::info!(endpoint = %config.otel_endpoint, "OTLP span export enabled");
        }

        Ok(Self {
            provider: builder.build(),
        })
    }

    /// Wrap an already built provider, e.g. one with an in-memory exporter.
    pub fn from_provider(provider: SdkTracerProvider) -> Self {
        Self { provider }
    }

    pub fn tracer(&self, name: &'static str) -> ServiceTracer {
        self.provider.tracer(name)
    }

    pub fn shutdown(self) {
        if let Err(e) = self.provider.shutdown() {
            tracing::warn!(error = ?e, "Error shutting down tracer provider");
        }
    }
}
