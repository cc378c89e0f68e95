use std::{fmt::Display, future::Future, time::Duration};

use backon::{ConstantBuilder, Retryable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Constant backoff allowing `max_attempts - 1` retries. Zero attempts
    /// still runs the operation once.
    pub fn backoff(&self) -> ConstantBuilder {
        ConstantBuilder::default()
            .with_delay(self.delay)
            .with_max_times(self.max_attempts.saturating_sub(1) as usize)
    }
}

/// Runs `op` until it succeeds or `policy.max_attempts` attempts have been made,
/// sleeping a fixed `policy.delay` between attempts.
///
/// The error of the last attempt is returned as is.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, operation: &str, op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    op.retry(policy.backoff())
        .notify(|e: &E, delay: Duration| {
            attempt += 1;
            tracing::warn!(
                operation,
                attempt,
                max_attempts,
                delay_secs = delay.as_secs_f64(),
                error = %e,
                "Attempt failed, retrying"
            );
        })
        .await
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use tokio::time::Instant;

    use super::*;

    const DELAY: Duration = Duration::from_secs(2);

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_two_failures() {
        let calls = Cell::new(0);
        let started = Instant::now();

        let result = retry(&RetryPolicy::new(3, DELAY), "flaky", || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move {
                if n < 3 {
                    Err(format!("failure {n}"))
                } else {
                    Ok("done")
                }
            }
        })
        .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(calls.get(), 3);
        // paused clock only advances through the sleeps: two of them
        assert_eq!(started.elapsed(), DELAY * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_last_error_unchanged() {
        let calls = Cell::new(0);
        let started = Instant::now();

        let result: Result<(), String> = retry(&RetryPolicy::new(3, DELAY), "always", || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move { Err(format!("failure {n}")) }
        })
        .await;

        assert_eq!(result, Err("failure 3".to_string()));
        assert_eq!(calls.get(), 3);
        assert_eq!(started.elapsed(), DELAY * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_sleep_on_first_success() {
        let started = Instant::now();

        let result: Result<u8, String> =
            retry(&RetryPolicy::new(5, DELAY), "ok", || async { Ok(7) }).await;

        assert_eq!(result, Ok(7));
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_runs_once() {
        let calls = Cell::new(0);

        let result: Result<(), &str> = retry(&RetryPolicy::new(0, DELAY), "zero", || {
            calls.set(calls.get() + 1);
            async { Err("nope") }
        })
        .await;

        assert_eq!(result, Err("nope"));
        assert_eq!(calls.get(), 1);
    }
}
