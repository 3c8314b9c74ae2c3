//! Bounded exponential-backoff retry for model calls.

use std::future::Future;
use std::time::Duration;
use tracing::warn;

use soundcheck_core::{Result, SoundcheckError};

/// Retry policy for transient provider failures.
///
/// The policy is deliberately ignorant of what it wraps: callers supply
/// the operation and the predicate that decides which errors are worth
/// another attempt. Everything else propagates immediately.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, counting the first.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles after each retried failure.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Backoff delay after the failure of zero-based `attempt`:
    /// base, 2*base, 4*base, 8*base, ...
    fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.pow(attempt)
    }

    /// Run `op`, retrying while `retryable` accepts the error and the
    /// attempt budget is not exhausted. The final failure is returned
    /// unchanged.
    pub async fn run<T, F, Fut, P>(&self, mut op: F, retryable: P) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
        P: Fn(&SoundcheckError) -> bool,
    {
        let mut attempt = 0u32;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if retryable(&e) && attempt + 1 < self.max_attempts => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max = self.max_attempts,
                        delay_secs = delay.as_secs(),
                        error = %e,
                        "retrying after transient error"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
