//! Caller-supplied deadlines for store-bound operations.
//!
//! Engine operations are blocking I/O-bound calls into the persistence layer.
//! Services bound each store future with an optional deadline so a stalled
//! store call is abandoned and surfaced as a distinct timeout condition
//! rather than a business-rule rejection.

use std::future::Future;
use std::time::Duration;

/// Awaits `future`, bounded by `limit` when one is configured.
///
/// Returns `None` when the deadline elapses first; the in-flight store call
/// is dropped at that point. With no limit the future is awaited to
/// completion.
pub async fn bounded<F>(limit: Option<Duration>, future: F) -> Option<F::Output>
where
    F: Future,
{
    match limit {
        None => Some(future.await),
        Some(limit) => tokio::time::timeout(limit, future).await.ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::bounded;
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread")]
    async fn unbounded_future_resolves() {
        let value = bounded(None, async { 7 }).await;
        assert_eq!(value, Some(7));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn elapsed_deadline_yields_none() {
        let value = bounded(
            Some(Duration::from_millis(5)),
            std::future::pending::<()>(),
        )
        .await;
        assert_eq!(value, None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn generous_deadline_resolves() {
        let value = bounded(Some(Duration::from_secs(5)), async { "done" }).await;
        assert_eq!(value, Some("done"));
    }
}
