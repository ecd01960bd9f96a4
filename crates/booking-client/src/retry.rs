//! Transient-failure retry with sequential exponential backoff.
//!
//! The policy exists because of an observed race on newly-issued widget
//! keys: the first calls after a key is created can fail with 401 or drop
//! the connection until the key propagates. It is not a general flakiness
//! shield — only status-less network failures and HTTP 401 are retried.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::Result;

/// Maximum number of retries after the initial attempt.
pub const MAX_RETRIES: u32 = 3;

/// First backoff delay; doubles on each subsequent retry (500ms, 1s, 2s).
pub const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// Run `op`, retrying transient failures up to [`MAX_RETRIES`] times.
///
/// Backoff is strictly sequential within one call; independent calls do not
/// share a retry budget. Non-transient errors surface immediately with no
/// delay. Must not be used for booking submission, which is sent exactly
/// once.
pub async fn with_retry<T, F, Fut>(op_name: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt: u32 = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < MAX_RETRIES => {
                let delay = INITIAL_BACKOFF * 2u32.pow(attempt);
                attempt += 1;
                warn!(
                    "{} failed ({}), retry {}/{} in {:?}",
                    op_name, err, attempt, MAX_RETRIES, delay
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
