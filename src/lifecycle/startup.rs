//! Startup wiring.
//!
//! Builds lookup clients, pipelines and the router for a role from a
//! validated `ServiceConfig`. The tracer is passed in, so the same wiring
//! serves production and tests.

use axum::Router;
use opentelemetry::trace::Tracer;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{ServiceConfig, WeatherMode};
use crate::http::{input_router, weather_router};
use crate::lookup::{
    http_client, LookupError, ViaCepClient, WeatherApiClient, WeatherLookup, WeatherServiceClient,
};
use crate::pipeline::{HopTimeouts, Orchestrator, RequestTracer, WeatherPipeline};

/// Which side of the two-hop pipeline this process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Accepts postal codes, calls postal directory and weather.
    Input,
    /// Accepts city names, calls weatherapi.com.
    Weather,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Input => "input",
            Role::Weather => "weather",
        }
    }

    /// Whether this role talks to weatherapi.com itself.
    pub fn requires_api_key(&self, config: &ServiceConfig) -> bool {
        match self {
            Role::Weather => true,
            Role::Input => config.weather.mode == WeatherMode::Direct,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn weather_api(config: &ServiceConfig) -> Result<WeatherApiClient, LookupError> {
    Ok(WeatherApiClient::new(
        http_client(Duration::from_secs(config.timeouts.connect_secs))?,
        &config.weather.api_url,
        &config.weather.api_key,
    ))
}

pub fn build_orchestrator<T>(config: &ServiceConfig, tracer: T) -> Result<Orchestrator<T>, LookupError>
where
    T: Tracer + Send + Sync,
    T::Span: Send + Sync + 'static,
{
    let connect = Duration::from_secs(config.timeouts.connect_secs);
    let postal = Arc::new(ViaCepClient::new(http_client(connect)?, &config.postal.base_url));

    let weather: Arc<dyn WeatherLookup> = match config.weather.mode {
        WeatherMode::Service => Arc::new(WeatherServiceClient::new(
            http_client(connect)?,
            &config.weather.service_url,
        )),
        WeatherMode::Direct => Arc::new(weather_api(config)?),
    };

    Ok(Orchestrator::new(
        postal,
        weather,
        RequestTracer::new(tracer, config.service.span_name.clone()),
        HopTimeouts {
            postal: Duration::from_millis(config.postal.timeout_ms),
            weather: Duration::from_millis(config.weather.timeout_ms),
        },
    ))
}

pub fn build_weather_pipeline<T>(config: &ServiceConfig, tracer: T) -> Result<WeatherPipeline<T>, LookupError>
where
    T: Tracer + Send + Sync,
    T::Span: Send + Sync + 'static,
{
    Ok(WeatherPipeline::new(
        Arc::new(weather_api(config)?),
        RequestTracer::new(tracer, config.service.span_name.clone()),
        Duration::from_millis(config.weather.timeout_ms),
    ))
}

/// Build the full router for `role`.
pub fn build_router<T>(role: Role, config: &ServiceConfig, tracer: T) -> Result<Router, LookupError>
where
    T: Tracer + Send + Sync + 'static,
    T::Span: Send + Sync + 'static,
{
    let request_timeout = Duration::from_secs(config.timeouts.request_secs);
    let router = match role {
        Role::Input => input_router(Arc::new(build_orchestrator(config, tracer)?), request_timeout),
        Role::Weather => weather_router(Arc::new(build_weather_pipeline(config, tracer)?), request_timeout),
    };

    tracing::info!(
        role = %role,
        weather_mode = ?config.weather.mode,
        postal_timeout_ms = config.postal.timeout_ms,
        weather_timeout_ms = config.weather.timeout_ms,
        "Pipeline wired"
    );
    Ok(router)
}
