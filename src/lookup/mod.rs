//! Outbound lookup clients.
//!
//! # Data Flow
//! ```text
//! Orchestrator
//!     → postal.rs (ViaCEP: CEP → locality)
//!     → weather_service.rs (weather service over HTTP, trace context injected)
//!         → weather_api.rs (weatherapi.com: locality → °C)
//! ```
//!
//! Every client receives the OpenTelemetry `Context` of the calling span and
//! injects it into its outbound headers, so all hops join one trace.

pub mod postal;
pub mod weather_api;
pub mod weather_service;

use async_trait::async_trait;
use opentelemetry::Context;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::pipeline::types::{Locality, PostalCode};

pub use postal::ViaCepClient;
pub use weather_api::WeatherApiClient;
pub use weather_service::WeatherServiceClient;

/// Identifies which outbound call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hop {
    Postal,
    Weather,
}

impl Hop {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hop::Postal => "postal",
            Hop::Weather => "weather",
        }
    }
}

impl fmt::Display for Hop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by lookup clients.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The directory answered but has no entry for the key.
    #[error("not found")]
    NotFound,

    /// The HTTP client gave up waiting on the upstream.
    #[error("request timed out")]
    Timeout,

    /// Connection failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Upstream answered with a non-success status.
    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Upstream body could not be decoded.
    #[error("invalid upstream response: {0}")]
    Decode(String),
}

impl LookupError {
    /// Classify a reqwest failure, keeping timeouts distinct.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::Timeout
        } else if err.is_decode() {
            LookupError::Decode(err.to_string())
        } else {
            LookupError::Transport(err.to_string())
        }
    }
}

/// Resolves a postal code to a locality.
#[async_trait]
pub trait PostalLookup: Send + Sync {
    async fn resolve(&self, code: &PostalCode, cx: &Context) -> Result<Locality, LookupError>;
}

/// Resolves a locality to its current temperature in Celsius.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn current_temperature(&self, locality: &Locality, cx: &Context) -> Result<f64, LookupError>;
}

/// Build a reqwest client for one hop. The overall hop deadline is enforced
/// by the orchestrator; this only bounds connection setup.
pub fn http_client(connect_timeout: Duration) -> Result<reqwest::Client, LookupError> {
    reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .build()
        .map_err(|e| LookupError::Transport(e.to_string()))
}

/// Read a JSON body after checking the status, mapping failures to
/// `LookupError`.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, LookupError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(LookupError::Status {
            status: status.as_u16(),
            body: body.trim().to_string(),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(LookupError::from_reqwest)?;
    serde_json::from_slice(&bytes).map_err(|e| LookupError::Decode(e.to_string()))
}
