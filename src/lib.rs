//! Postal code → current temperature, as a two-hop traced pipeline.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod lookup;
pub mod observability;
pub mod pipeline;
pub mod resilience;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::{Role, Shutdown};
pub use pipeline::{Orchestrator, PipelineError, TemperatureResult, WeatherPipeline};
