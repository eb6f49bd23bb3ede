//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for both service
//! roles. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Service identity used for spans and resources.
    pub service: IdentityConfig,

    /// Postal directory hop.
    pub postal: PostalConfig,

    /// Weather hop.
    pub weather: WeatherConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// `service.name` resource attribute.
    pub name: String,

    /// Name of the per-request span.
    pub span_name: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            name: "temperature-service".to_string(),
            span_name: "temperature-request".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PostalConfig {
    /// ViaCEP base URL; requests go to `{base_url}/ws/{cep}/json/`.
    pub base_url: String,

    /// Hop deadline in milliseconds.
    pub timeout_ms: u64,
}

impl Default for PostalConfig {
    fn default() -> Self {
        Self {
            base_url: "http://viacep.com.br".to_string(),
            timeout_ms: 5_000,
        }
    }
}

/// How the input role reaches the weather data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherMode {
    /// Through the weather service (`POST {service_url}/v1/weather`).
    Service,
    /// Straight to weatherapi.com.
    Direct,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub mode: WeatherMode,

    /// Weather service base URL.
    pub service_url: String,

    /// weatherapi.com base URL.
    pub api_url: String,

    /// weatherapi.com key; `WEATHER_API_KEY` overrides it.
    pub api_key: String,

    /// Hop deadline in milliseconds.
    pub timeout_ms: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            mode: WeatherMode::Service,
            service_url: "http://service-b:8081".to_string(),
            api_url: "http://api.weatherapi.com".to_string(),
            api_key: String::new(),
            timeout_ms: 5_000,
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout for outbound calls, in seconds.
    pub connect_secs: u64,

    /// Inbound request timeout (total handler time) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 2,
            request_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,

    /// Export spans over OTLP.
    pub otel_enabled: bool,

    /// OTLP gRPC collector endpoint.
    pub otel_endpoint: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Json,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
            otel_enabled: false,
            otel_endpoint: "http://otel-collector:4317".to_string(),
        }
    }
}
