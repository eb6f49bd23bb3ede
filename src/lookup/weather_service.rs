//! Client for the weather service (the second hop of the input service).

use async_trait::async_trait;
use opentelemetry::Context;
use serde::{Deserialize, Serialize};

use crate::lookup::weather_api::WeatherResponse;
use crate::lookup::{read_json, LookupError, WeatherLookup};
use crate::observability::propagation::TraceCarrier;
use crate::pipeline::types::Locality;

/// Request body of `POST /v1/weather`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherRequest {
    pub city: String,
}

#[derive(Clone)]
pub struct WeatherServiceClient {
    client: reqwest::Client,
    endpoint: String,
    carrier: TraceCarrier,
}

impl WeatherServiceClient {
    pub fn new(client: reqwest::Client, base_url: impl AsRef<str>) -> Self {
        Self {
            client,
            endpoint: format!("{}/v1/weather", base_url.as_ref().trim_end_matches('/')),
            carrier: TraceCarrier::new(),
        }
    }
}

#[async_trait]
impl WeatherLookup for WeatherServiceClient {
    async fn current_temperature(&self, locality: &Locality, cx: &Context) -> Result<f64, LookupError> {
        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.carrier.headers_for(cx))
            .json(&WeatherRequest {
                city: locality.to_string(),
            })
            .send()
            .await
            .map_err(LookupError::from_reqwest)?;

        let body: WeatherResponse = read_json(response).await?;
        Ok(body.current.temp_c)
    }
}
