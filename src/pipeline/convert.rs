//! Temperature scale conversion.

use crate::pipeline::types::{TemperatureResult, WeatherReading};

const KELVIN_OFFSET: f64 = 273.15;

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + KELVIN_OFFSET
}

/// Build the response body for a reading.
pub fn to_result(reading: WeatherReading) -> TemperatureResult {
    let celsius = reading.celsius;
    TemperatureResult {
        city: reading.locality.into_inner(),
        celsius,
        fahrenheit: celsius_to_fahrenheit(celsius),
        kelvin: celsius_to_kelvin(celsius),
    }
}
