//! Request-scoped value types flowing through the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of digits in a CEP.
pub const POSTAL_CODE_LEN: usize = 8;

/// Inbound payload for the temperature endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PostalCodeRequest {
    pub cep: String,
}

/// A validated 8-digit postal code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalCode(String);

impl PostalCode {
    /// Accepts exactly eight ASCII decimal digits. Signs, whitespace and
    /// non-ASCII digits are rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() == POSTAL_CODE_LEN && raw.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Place name resolved from a postal code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locality(String);

impl Locality {
    /// Returns `None` for blank names.
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            None
        } else {
            Some(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Locality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current temperature measured for a locality.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub locality: Locality,
    pub celsius: f64,
}

/// Response body of the temperature endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureResult {
    pub city: String,
    #[serde(rename = "temp_C")]
    pub celsius: f64,
    #[serde(rename = "temp_F")]
    pub fahrenheit: f64,
    #[serde(rename = "temp_K")]
    pub kelvin: f64,
}
