//! Retry budget for event stream subscriptions.
//!
//! A subscription restarts the whole request after an attempt fails. The
//! delay between attempts is fixed; there is no exponential growth.

use std::time::Duration;

/// Retries allowed after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 2;
/// Pause between a failed attempt and the next one.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not including the initial attempt)
    pub max_retries: u32,
    /// Fixed delay before each retry
    pub interval: Duration,
}

impl RetryConfig {
    pub fn fixed(max_retries: u32, interval: Duration) -> Self {
        Self {
            max_retries,
            interval,
        }
    }

    /// Fail on the first error.
    pub fn none() -> Self {
        Self::fixed(0, Duration::ZERO)
    }

    /// Delay before retry number `retry` (1-based), or `None` once the budget is spent.
    pub fn delay_for(&self, retry: u32) -> Option<Duration> {
        if retry == 0 || retry > self.max_retries {
            return None;
        }
        Some(self.interval)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::fixed(DEFAULT_MAX_RETRIES, DEFAULT_RETRY_INTERVAL)
    }
}
