//! Bounded retry with a fixed backoff, gated by an error predicate.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// How many extra attempts to make and how long to wait before each one.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Attempts after the first. `max_retries = 5` means up to 6 calls.
    pub max_retries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub const fn fixed(max_retries: u32, backoff: Duration) -> Self {
        Self {
            max_retries,
            backoff,
        }
    }
}

/// Runs `op` until it succeeds, fails with an error `should_retry` rejects,
/// or the policy's retries are used up. Returns the last result.
pub async fn retry_if<T, E, Op, Fut, P>(
    policy: RetryPolicy,
    should_retry: P,
    mut op: Op,
) -> Result<T, E>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let mut attempt = 0u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < policy.max_retries && should_retry(&e) => {
                attempt += 1;
                warn!(
                    "Attempt failed ({}), retrying after {}ms ({}/{})",
                    e,
                    policy.backoff.as_millis(),
                    attempt,
                    policy.max_retries
                );
                tokio::time::sleep(policy.backoff).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    const POLICY: RetryPolicy = RetryPolicy::fixed(5, Duration::from_millis(1500));

    #[tokio::test(start_paused = true)]
    async fn test_retries_until_budget_exhausted() {
        let calls = AtomicU32::new(0);
        let result: Result<(), String> = retry_if(
            POLICY,
            |_| true,
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("busy".to_string())
            },
        )
        .await;

        assert_eq!(result.unwrap_err(), "busy");
        assert_eq!(calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_on_non_retryable_error() {
        let calls = AtomicU32::new(0);
        let result: Result<(), String> = retry_if(
            POLICY,
            |e: &String| e == "busy",
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("fatal".to_string())
            },
        )
        .await;

        assert_eq!(result.unwrap_err(), "fatal");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_first_success() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = retry_if(
            POLICY,
            |_| true,
            || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err("busy".to_string())
                } else {
                    Ok(n)
                }
            },
        )
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_backoff_between_attempts() {
        let start = tokio::time::Instant::now();
        let _: Result<(), &str> = retry_if(POLICY, |_| true, || async { Err("busy") }).await;
        assert!(start.elapsed() >= Duration::from_millis(7500));
    }
}
