//! ViaCEP postal directory client.

use async_trait::async_trait;
use opentelemetry::Context;
use serde::{Deserialize, Deserializer};

use crate::lookup::{read_json, LookupError, PostalLookup};
use crate::observability::propagation::TraceCarrier;
use crate::pipeline::types::{Locality, PostalCode};

/// Subset of the ViaCEP payload we care about.
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    localidade: Option<String>,
    /// ViaCEP has sent this both as `true` and as `"true"`.
    #[serde(default, deserialize_with = "deserialize_flag")]
    erro: bool,
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(s) => s.eq_ignore_ascii_case("true"),
    })
}

#[derive(Clone)]
pub struct ViaCepClient {
    client: reqwest::Client,
    base_url: String,
    carrier: TraceCarrier,
}

impl ViaCepClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            carrier: TraceCarrier::new(),
        }
    }

    fn url_for(&self, code: &PostalCode) -> String {
        format!("{}/ws/{}/json/", self.base_url, code)
    }
}

#[async_trait]
impl PostalLookup for ViaCepClient {
    async fn resolve(&self, code: &PostalCode, cx: &Context) -> Result<Locality, LookupError> {
        let url = self.url_for(code);
        tracing::debug!(url = %url, "Querying postal directory");

        let response = self
            .client
            .get(&url)
            .headers(self.carrier.headers_for(cx))
            .send()
            .await
            .map_err(LookupError::from_reqwest)?;

        let body: ViaCepResponse = read_json(response).await?;
        if body.erro {
            return Err(LookupError::NotFound);
        }

        body.localidade
            .and_then(Locality::new)
            .ok_or(LookupError::NotFound)
    }
}
