//! weatherapi.com client.

use async_trait::async_trait;
use opentelemetry::Context;
use serde::{Deserialize, Serialize};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};
use url::Url;

use crate::lookup::{read_json, LookupError, WeatherLookup};
use crate::observability::propagation::TraceCarrier;
use crate::pipeline::types::Locality;

/// Current-conditions payload, `{"current": {"temp_c": ..}}`.
///
/// The weather service answers with the same shape it receives from
/// weatherapi.com.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub current: CurrentConditions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f64,
}

impl WeatherResponse {
    pub fn from_celsius(temp_c: f64) -> Self {
        Self {
            current: CurrentConditions { temp_c },
        }
    }
}

/// Strip diacritics ("São Paulo" → "Sao Paulo").
pub fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}

#[derive(Clone)]
pub struct WeatherApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    carrier: TraceCarrier,
}

impl WeatherApiClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            carrier: TraceCarrier::new(),
        }
    }

    /// Build the query URL. The locality is ASCII-folded and then
    /// form-encoded, so the query never carries raw spaces or accents.
    pub fn url_for(&self, locality: &Locality) -> Result<Url, LookupError> {
        let query = strip_diacritics(locality.as_str());
        Url::parse_with_params(
            &format!("{}/v1/current.json", self.base_url),
            &[
                ("key", self.api_key.as_str()),
                ("q", query.as_str()),
                ("aqi", "no"),
            ],
        )
        .map_err(|e| LookupError::Transport(format!("invalid weather api url: {e}")))
    }
}

#[async_trait]
impl WeatherLookup for WeatherApiClient {
    async fn current_temperature(&self, locality: &Locality, cx: &Context) -> Result<f64, LookupError> {
        let url = self.url_for(locality)?;
        tracing::debug!(locality = %locality, "Querying weather api");

        let response = self
            .client
            .get(url)
            .headers(self.carrier.headers_for(cx))
            .send()
            .await
            .map_err(LookupError::from_reqwest)?;

        let body: WeatherResponse = read_json(response).await?;
        Ok(body.current.temp_c)
    }
}
