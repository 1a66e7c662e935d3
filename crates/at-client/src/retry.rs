//! Retry policy with Airtable's backoff schedule.
//!
//! The first retry comes quickly (a 429 usually clears within the rate
//! limit window); from the second retry on the wait is `base_wait` plus an
//! exponential term, so repeated gateway failures back off hard.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::{Error, ErrorKind, Result};

/// Default fixed floor added to every wait after the first (30 seconds).
pub const DEFAULT_BASE_WAIT: Duration = Duration::from_secs(30);

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retries. `None` retries until success or give-up.
    pub max_attempts: Option<u32>,
    /// Floor added to every wait after the first one.
    pub base_wait: Duration,
    /// Unit of the exponential term (one second in production).
    pub unit: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: None,
            base_wait: DEFAULT_BASE_WAIT,
            unit: Duration::from_secs(1),
        }
    }
}

impl RetryConfig {
    /// Retry until success or a non-transient failure.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Disable retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: Some(0),
            ..Default::default()
        }
    }

    /// Cap the number of retries.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Set the floor added to every wait after the first.
    pub fn with_base_wait(mut self, base_wait: Duration) -> Self {
        self.base_wait = base_wait;
        self
    }

    /// Set the unit of the exponential term.
    pub fn with_unit(mut self, unit: Duration) -> Self {
        self.unit = unit;
        self
    }

    /// Wait before re-running after failed attempt `attempt` (1-indexed).
    ///
    /// Attempt 1 waits `2^0` units; attempt `n > 1` waits
    /// `base_wait + 2^(n-1)` units.
    pub fn wait_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let expo = self.unit.saturating_mul(1u32 << exponent);
        if attempt <= 1 {
            expo
        } else {
            self.base_wait.saturating_add(expo)
        }
    }
}

/// Retry policy that determines when and how long to wait.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
    attempt: u32,
}

impl RetryPolicy {
    /// Create a new retry policy from config.
    pub fn new(config: RetryConfig) -> Self {
        Self { config, attempt: 0 }
    }

    /// Number of failed attempts recorded so far.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Returns true if another retry is allowed.
    pub fn should_retry(&self) -> bool {
        self.config
            .max_attempts
            .map_or(true, |max| self.attempt < max)
    }

    /// Record a failed attempt and return the delay before the next one.
    /// Returns None once the ceiling is reached.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if !self.should_retry() {
            return None;
        }
        self.attempt += 1;
        Some(self.config.wait_for(self.attempt))
    }
}

/// Run `operation` until it succeeds, fails with a non-transient error, or
/// the ceiling in `config` is reached.
///
/// The backoff sleep is a plain `tokio::time::sleep`, so dropping the
/// returned future cancels the whole loop.
pub async fn with_retry<T, F, Fut>(config: &RetryConfig, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut policy = RetryPolicy::new(config.clone());

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() => match policy.next_delay() {
                Some(delay) => {
                    warn!(
                        attempt = policy.attempt(),
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                None if policy.attempt() == 0 => return Err(err),
                None => {
                    return Err(Error::with_source(
                        ErrorKind::RetriesExhausted {
                            attempts: policy.attempt(),
                        },
                        err,
                    ));
                }
            },
            Err(err) => return Err(err),
        }
    }
}
