//! Locality → current conditions pipeline, served by the weather role.

use http::HeaderMap;
use opentelemetry::{
    trace::{TraceContextExt, Tracer},
    KeyValue,
};
use std::sync::Arc;
use std::time::Duration;

use crate::lookup::weather_api::WeatherResponse;
use crate::lookup::weather_service::WeatherRequest;
use crate::lookup::{Hop, WeatherLookup};
use crate::pipeline::error::{PipelineError, INVALID_WEATHER};
use crate::pipeline::instrument::RequestTracer;
use crate::pipeline::types::Locality;

pub struct WeatherPipeline<T> {
    weather: Arc<dyn WeatherLookup>,
    tracer: RequestTracer<T>,
    timeout: Duration,
}

impl<T> WeatherPipeline<T>
where
    T: Tracer + Send + Sync,
    T::Span: Send + Sync + 'static,
{
    pub fn new(weather: Arc<dyn WeatherLookup>, tracer: RequestTracer<T>, timeout: Duration) -> Self {
        Self {
            weather,
            tracer,
            timeout,
        }
    }

    pub fn validate(body: &[u8]) -> Result<Locality, PipelineError> {
        let request: WeatherRequest =
            serde_json::from_slice(body).map_err(|_| PipelineError::Validation(INVALID_WEATHER))?;
        Locality::new(request.city).ok_or(PipelineError::Validation(INVALID_WEATHER))
    }

    /// The request span joins the caller's trace through the inbound
    /// `traceparent` header.
    pub async fn handle(&self, body: &[u8], headers: &HeaderMap) -> Result<WeatherResponse, PipelineError> {
        let locality = Self::validate(body)?;

        let cx = self.tracer.start_request(headers);
        cx.span().set_attribute(KeyValue::new("request.city", locality.to_string()));

        let weather = &self.weather;
        let outcome = self
            .tracer
            .hop(Hop::Weather, self.timeout, &cx, |hop_cx| async move {
                weather.current_temperature(&locality, &hop_cx).await
            })
            .await
            .map(WeatherResponse::from_celsius);

        self.tracer.finish_request(&cx, &outcome);
        outcome
    }
}
