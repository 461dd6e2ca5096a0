//! Upper bound on the duration of a single storage operation.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

/// Default storage deadline.
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Await `operation`, returning `timed_out()` if it does not finish within
/// `deadline`. The operation future is dropped on expiry, which abandons the
/// in-flight query.
pub(crate) async fn with_deadline<T, E, F, O>(deadline: Duration, timed_out: O, operation: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    O: FnOnce() -> E,
{
    if let Ok(result) = tokio::time::timeout(deadline, operation).await {
        result
    } else {
        debug!(deadline_ms = deadline.as_millis(), "storage deadline elapsed");
        Err(timed_out())
    }
}
