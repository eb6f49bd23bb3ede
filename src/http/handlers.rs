//! Route handlers for both service roles.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use opentelemetry::trace::Tracer;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::http::request::request_id;
use crate::observability::metrics;
use crate::pipeline::{Orchestrator, WeatherPipeline};

#[derive(Serialize)]
pub struct HealthStatus {
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn get_health() -> Json<HealthStatus> {
    Json(HealthStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
    })
}

/// `POST /v1/temperature`
pub async fn post_temperature<T>(
    State(orchestrator): State<Arc<Orchestrator<T>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    T: Tracer + Send + Sync + 'static,
    T::Span: Send + Sync + 'static,
{
    let start = Instant::now();
    let response = match orchestrator.handle(&body, &headers).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            tracing::info!(
                request_id = %request_id(&headers),
                status = e.status_code().as_u16(),
                error = %e,
                "Temperature request failed"
            );
            e.into_response()
        }
    };
    metrics::record_request("input", response.status().as_u16(), start);
    response
}

/// `POST /v1/weather`
pub async fn post_weather<T>(
    State(pipeline): State<Arc<WeatherPipeline<T>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    T: Tracer + Send + Sync + 'static,
    T::Span: Send + Sync + 'static,
{
    let start = Instant::now();
    let response = match pipeline.handle(&body, &headers).await {
        Ok(reading) => (StatusCode::OK, Json(reading)).into_response(),
        Err(e) => {
            tracing::info!(
                request_id = %request_id(&headers),
                status = e.status_code().as_u16(),
                error = %e,
                "Weather request failed"
            );
            e.into_response()
        }
    };
    metrics::record_request("weather", response.status().as_u16(), start);
    response
}
