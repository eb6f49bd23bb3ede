//! Configuration validation.
//!
//! Serde handles syntax; this checks values. All problems are reported at
//! once, not just the first.

use std::fmt;
use std::net::SocketAddr;
use url::Url;

use crate::config::schema::{ServiceConfig, WeatherMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn check_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(field, format!("unsupported scheme '{}'", url.scheme()))),
        Err(e) => errors.push(ValidationError::new(field, format!("invalid url '{value}': {e}"))),
    }
}

fn check_addr(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(field, format!("invalid socket address '{value}'")));
    }
}

/// Validate a whole configuration.
///
/// The weather API key is only required where weatherapi.com is called
/// directly, so `require_api_key` is decided by the caller's role.
pub fn validate_config(config: &ServiceConfig, require_api_key: bool) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_addr("listener.bind_address", &config.listener.bind_address, &mut errors);
    check_url("postal.base_url", &config.postal.base_url, &mut errors);

    match config.weather.mode {
        WeatherMode::Service => check_url("weather.service_url", &config.weather.service_url, &mut errors),
        WeatherMode::Direct => check_url("weather.api_url", &config.weather.api_url, &mut errors),
    }

    if require_api_key && config.weather.api_key.trim().is_empty() {
        errors.push(ValidationError::new("weather.api_key", "must be set (or WEATHER_API_KEY)"));
    }

    if config.postal.timeout_ms == 0 {
        errors.push(ValidationError::new("postal.timeout_ms", "must be greater than zero"));
    }
    if config.weather.timeout_ms == 0 {
        errors.push(ValidationError::new("weather.timeout_ms", "must be greater than zero"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than zero"));
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::new("timeouts.connect_secs", "must be greater than zero"));
    }

    if config.observability.metrics_enabled {
        check_addr("observability.metrics_address", &config.observability.metrics_address, &mut errors);
    }
    if config.observability.otel_enabled {
        check_url("observability.otel_endpoint", &config.observability.otel_endpoint, &mut errors);
    }

    if config.service.span_name.trim().is_empty() {
        errors.push(ValidationError::new("service.span_name", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
