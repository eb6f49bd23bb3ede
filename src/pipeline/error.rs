//! Pipeline error taxonomy.

use std::time::Duration;
use thiserror::Error;

use crate::lookup::{Hop, LookupError};

/// Body text for rejected postal codes.
pub const INVALID_ZIPCODE: &str = "invalid zipcode";
/// Body text for rejected weather requests.
pub const INVALID_WEATHER: &str = "invalid weather";
/// Body text for unknown postal codes.
pub const ZIPCODE_NOT_FOUND: &str = "can not find zipcode";

/// Terminal outcome of a failed request. None of these are retried.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Malformed body or a code that is not 8 digits.
    #[error("{0}")]
    Validation(&'static str),

    /// The postal directory has no entry for the code.
    #[error("can not find zipcode")]
    NotFound,

    /// A hop failed: transport, non-2xx or undecodable body.
    #[error("an error occurred when calling {hop} - {source}")]
    Upstream {
        hop: Hop,
        #[source]
        source: LookupError,
    },

    /// A hop exceeded its deadline.
    #[error("{hop} lookup timed out after {}ms", .after.as_millis())]
    Timeout { hop: Hop, after: Duration },
}

impl PipelineError {
    /// Map a lookup failure on `hop`. Only the postal hop has a not-found
    /// outcome; on the weather hop it is just another upstream failure.
    pub fn from_lookup(hop: Hop, err: LookupError, deadline: Duration) -> Self {
        match (hop, err) {
            (Hop::Postal, LookupError::NotFound) => PipelineError::NotFound,
            (hop, LookupError::Timeout) => PipelineError::Timeout { hop, after: deadline },
            (hop, source) => PipelineError::Upstream { hop, source },
        }
    }

    /// The hop that failed, if any.
    pub fn hop(&self) -> Option<Hop> {
        match self {
            PipelineError::Upstream { hop, .. } | PipelineError::Timeout { hop, .. } => Some(*hop),
            PipelineError::NotFound => Some(Hop::Postal),
            PipelineError::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postal_not_found_is_distinct_from_transport() {
        let deadline = Duration::from_secs(5);
        assert!(matches!(
            PipelineError::from_lookup(Hop::Postal, LookupError::NotFound, deadline),
            PipelineError::NotFound
        ));
        assert!(matches!(
            PipelineError::from_lookup(Hop::Postal, LookupError::Transport("refused".into()), deadline),
            PipelineError::Upstream { hop: Hop::Postal, .. }
        ));
    }

    #[test]
    fn test_weather_not_found_is_upstream() {
        let err = PipelineError::from_lookup(Hop::Weather, LookupError::NotFound, Duration::from_secs(5));
        assert!(matches!(err, PipelineError::Upstream { hop: Hop::Weather, .. }));
    }

    #[test]
    fn test_upstream_message_names_hop() {
        let err = PipelineError::Upstream {
            hop: Hop::Weather,
            source: LookupError::Transport("connection refused".into()),
        };
        assert_eq!(
            err.to_string(),
            "an error occurred when calling weather - transport error: connection refused"
        );
    }

    #[test]
    fn test_timeout_keeps_deadline() {
        let err = PipelineError::from_lookup(Hop::Weather, LookupError::Timeout, Duration::from_millis(250));
        assert_eq!(err.to_string(), "weather lookup timed out after 250ms");
    }
}
