//! Postal code → temperature pipeline.
//!
//! # Data Flow
//! ```text
//! body + headers
//!     → parse & validate (422, no outbound call)
//!     → request span (child of inbound trace context)
//!     → postal hop (404 not found / 502 upstream / 504 timeout)
//!     → weather hop, trace context injected (502 / 504)
//!     → convert → 200 {city, temp_C, temp_F, temp_K}
//! ```
//!
//! Hops run strictly in order: the weather query needs the locality.

use http::HeaderMap;
use opentelemetry::{
    trace::{TraceContextExt, Tracer},
    KeyValue,
};
use std::sync::Arc;
use std::time::Duration;

use crate::lookup::{Hop, PostalLookup, WeatherLookup};
use crate::observability::propagation;
use crate::pipeline::convert;
use crate::pipeline::error::{PipelineError, INVALID_ZIPCODE};
use crate::pipeline::instrument::RequestTracer;
use crate::pipeline::types::{PostalCode, PostalCodeRequest, TemperatureResult, WeatherReading};
use crate::resilience::timeouts::DEFAULT_HOP_TIMEOUT;

/// Per-hop deadlines.
#[derive(Debug, Clone, Copy)]
pub struct HopTimeouts {
    pub postal: Duration,
    pub weather: Duration,
}

impl Default for HopTimeouts {
    fn default() -> Self {
        Self {
            postal: DEFAULT_HOP_TIMEOUT,
            weather: DEFAULT_HOP_TIMEOUT,
        }
    }
}

pub struct Orchestrator<T> {
    postal: Arc<dyn PostalLookup>,
    weather: Arc<dyn WeatherLookup>,
    tracer: RequestTracer<T>,
    timeouts: HopTimeouts,
}

impl<T> Orchestrator<T>
where
    T: Tracer + Send + Sync,
    T::Span: Send + Sync + 'static,
{
    pub fn new(
        postal: Arc<dyn PostalLookup>,
        weather: Arc<dyn WeatherLookup>,
        tracer: RequestTracer<T>,
        timeouts: HopTimeouts,
    ) -> Self {
        Self {
            postal,
            weather,
            tracer,
            timeouts,
        }
    }

    /// Parse and validate the raw body. Runs before any span or outbound
    /// call exists.
    pub fn validate(body: &[u8]) -> Result<PostalCode, PipelineError> {
        let request: PostalCodeRequest =
            serde_json::from_slice(body).map_err(|_| PipelineError::Validation(INVALID_ZIPCODE))?;
        PostalCode::parse(&request.cep).ok_or(PipelineError::Validation(INVALID_ZIPCODE))
    }

    /// Handle one temperature request end to end.
    pub async fn handle(&self, body: &[u8], headers: &HeaderMap) -> Result<TemperatureResult, PipelineError> {
        let code = Self::validate(body)?;

        let cx = self.tracer.start_request(headers);
        cx.span().set_attribute(KeyValue::new("request.cep", code.to_string()));
        tracing::info!(
            cep = %code,
            trace_id = %propagation::trace_id(&cx).unwrap_or_default(),
            "Resolving temperature"
        );

        let postal = &self.postal;
        let locality = self
            .tracer
            .hop(Hop::Postal, self.timeouts.postal, &cx, |hop_cx| async move {
                postal.resolve(&code, &hop_cx).await
            })
            .await;

        let outcome = match locality {
            Ok(locality) => {
                cx.span().set_attribute(KeyValue::new("postal.locality", locality.to_string()));
                let weather = &self.weather;
                let reading = self
                    .tracer
                    .hop(Hop::Weather, self.timeouts.weather, &cx, |hop_cx| {
                        let locality = locality.clone();
                        async move { weather.current_temperature(&locality, &hop_cx).await }
                    })
                    .await;
                reading.map(|celsius| convert::to_result(WeatherReading { locality, celsius }))
            }
            Err(e) => Err(e),
        };

        if let Ok(result) = &outcome {
            cx.span().set_attribute(KeyValue::new("weather.temp_c", result.celsius));
        }
        self.tracer.finish_request(&cx, &outcome);
        outcome
    }
}
