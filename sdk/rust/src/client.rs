use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct TemperatureRequest {
    pub cep: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub city: String,
    #[serde(rename = "temp_C")]
    pub celsius: f64,
    #[serde(rename = "temp_F")]
    pub fahrenheit: f64,
    #[serde(rename = "temp_K")]
    pub kelvin: f64,
}

/// Non-2xx answer from the service. `body` is the plain-text error message.
#[derive(Debug)]
pub struct ServiceError {
    pub status: StatusCode,
    pub body: String,
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "service returned {}: {}", self.status, self.body)
    }
}

impl std::error::Error for ServiceError {}

pub struct TemperatureClient {
    client: Client,
    base_url: String,
}

impl TemperatureClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Current temperature for a CEP.
    pub async fn temperature(&self, cep: &str) -> Result<Temperature, Box<dyn std::error::Error>> {
        self.post_temperature(cep, None).await
    }

    /// Same as `temperature`, joining the caller's trace through a W3C
    /// `traceparent` value.
    pub async fn temperature_traced(
        &self,
        cep: &str,
        traceparent: &str,
    ) -> Result<Temperature, Box<dyn std::error::Error>> {
        self.post_temperature(cep, Some(traceparent)).await
    }

    async fn post_temperature(
        &self,
        cep: &str,
        traceparent: Option<&str>,
    ) -> Result<Temperature, Box<dyn std::error::Error>> {
        let mut req = self.client
            .post(format!("{}/v1/temperature", self.base_url))
            .json(&TemperatureRequest { cep: cep.to_string() });
        if let Some(traceparent) = traceparent {
            req = req.header("traceparent", traceparent);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(ServiceError { status, body: text }.into());
        }

        Ok(serde_json::from_str::<Temperature>(&text)?)
    }

    pub async fn health(&self) -> Result<bool, reqwest::Error> {
        let resp = self.client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }
}
