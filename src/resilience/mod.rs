//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Hop call from a pipeline:
//!     → timeouts.rs (per-hop deadline, 504 on expiry)
//! ```
//!
//! Hops are never retried: a single failed hop fails the request.

pub mod timeouts;
