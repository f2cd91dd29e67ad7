//! Fixed-interval retry policy.

use std::time::Duration;

/// How many times to retry and how long to pause between attempts.
///
/// The interval is fixed; it does not grow between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    retry_interval: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, retry_interval: Duration) -> Self {
        Self {
            max_retries,
            retry_interval,
        }
    }

    /// Retries allowed after the first attempt.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn retry_interval(&self) -> Duration {
        self.retry_interval
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(12, Duration::from_secs(10))
    }
}
