//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap every hop with a deadline
//! - Cancel the outbound call cleanly on expiry
//!
//! Timeout errors stay distinct from other upstream failures and are
//! answered with 504 Gateway Timeout.

use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

use crate::lookup::{Hop, LookupError};
use crate::pipeline::error::PipelineError;

/// Default deadline for a single hop.
pub const DEFAULT_HOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Run `call` for `hop`, giving up after `deadline`.
///
/// On expiry the inner future is dropped, which aborts the request in flight.
pub async fn bounded<T, F>(hop: Hop, deadline: Duration, call: F) -> Result<T, PipelineError>
where
    F: Future<Output = Result<T, LookupError>>,
{
    match timeout(deadline, call).await {
        Ok(result) => result.map_err(|e| PipelineError::from_lookup(hop, e, deadline)),
        Err(_) => Err(PipelineError::Timeout { hop, after: deadline }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bounded_passes_result_through() {
        let value = bounded(Hop::Postal, Duration::from_secs(1), async { Ok::<_, LookupError>(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_bounded_times_out() {
        let result: Result<(), _> = bounded(Hop::Weather, Duration::from_millis(20), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;

        assert!(matches!(
            result,
            Err(PipelineError::Timeout { hop: Hop::Weather, .. })
        ));
    }

    #[tokio::test]
    async fn test_bounded_maps_lookup_error() {
        let result: Result<(), _> = bounded(Hop::Postal, Duration::from_secs(1), async {
            Err(LookupError::NotFound)
        })
        .await;
        assert!(matches!(result, Err(PipelineError::NotFound)));
    }
}
