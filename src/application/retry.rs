//! Bounded retry with a fixed delay.

use std::future::Future;
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;

/// How many times to try an operation and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Zero behaves like one.
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Runs `operation` until it succeeds, fails with an error that
    /// `is_retryable` rejects, or the attempts run out.
    ///
    /// The last error is returned when attempts are exhausted.
    pub async fn run<T, E, F, Fut, P>(&self, operation: F, mut is_retryable: P) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
        P: FnMut(&E) -> bool,
    {
        let retries = self.max_attempts.saturating_sub(1) as usize;
        let strategy = FixedInterval::new(self.delay).take(retries);
        let mut attempt = 0u32;
        let max_attempts = self.max_attempts.max(1);

        RetryIf::spawn(strategy, operation, |e: &E| {
            attempt += 1;
            let retry = is_retryable(e);
            if retry && attempt < max_attempts {
                tracing::warn!("Attempt {attempt}/{max_attempts} failed, retrying: {e}");
            }
            retry
        })
        .await
    }
}
