//! Request pipelines.
//!
//! # Data Flow
//! ```text
//! Input role:   Orchestrator    = validate → postal hop → weather hop → convert
//! Weather role: WeatherPipeline = validate → weather api hop
//! ```
//!
//! Both share `RequestTracer` for span handling and hop deadlines, and both
//! report failures as `PipelineError`.

pub mod convert;
pub mod error;
pub mod instrument;
pub mod orchestrator;
pub mod types;
pub mod weather;

pub use error::PipelineError;
pub use instrument::RequestTracer;
pub use orchestrator::{HopTimeouts, Orchestrator};
pub use types::{Locality, PostalCode, TemperatureResult, WeatherReading};
pub use weather::WeatherPipeline;
