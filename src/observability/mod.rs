//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Pipelines produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!     → telemetry.rs (OpenTelemetry spans, exported over OTLP)
//!
//! Across services:
//!     → propagation.rs (W3C traceparent in, traceparent out)
//! ```

pub mod logging;
pub mod metrics;
pub mod propagation;
pub mod telemetry;

pub use propagation::TraceCarrier;
pub use telemetry::{ServiceTracer, Telemetry};
