//! Per-key request spacing.
//!
//! Airtable allows five requests per second per base. Each base id is a key
//! in a keyed `governor` limiter whose quota admits one request per
//! `min_interval` with no burst, so callers on different keys never wait on
//! each other.

use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter as GovernorRateLimiter};
use tracing::trace;

/// Default spacing between request starts on one key (5 requests/second).
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(200);

/// Configuration for the rate limiter.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Minimum time between the starts of two requests sharing a key.
    pub min_interval: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            min_interval: DEFAULT_MIN_INTERVAL,
        }
    }
}

impl RateLimitConfig {
    /// Spacing for a given number of requests per second.
    pub fn per_second(requests: u32) -> Self {
        Self {
            min_interval: Duration::from_secs(1) / requests.max(1),
        }
    }

    /// No spacing at all.
    pub fn disabled() -> Self {
        Self {
            min_interval: Duration::ZERO,
        }
    }
}

/// One cell per `min_interval`, burst of one. `None` when spacing is off.
fn quota_for(min_interval: Duration) -> Option<Quota> {
    Quota::with_period(min_interval)
}

/// Proof that the holder was admitted for `key`.
///
/// Admission is recorded by the limiter before the permit is handed out, so
/// dropping the permit early never lets a later caller start sooner. A
/// caller cancelled while waiting consumes nothing.
#[derive(Debug)]
#[must_use = "the permit marks the start of a rate-limited request"]
pub struct RateLimitPermit {
    key: String,
    started_at: Instant,
}

impl RateLimitPermit {
    /// The key the permit was issued for.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// When the caller was let through.
    pub fn started_at(&self) -> Instant {
        self.started_at
    }
}

/// Minimum-interval limiter keyed by an arbitrary string (the base id).
pub struct RateLimiter {
    min_interval: Duration,
    quota: Option<Quota>,
    keyed: RwLock<Option<Arc<DefaultKeyedRateLimiter<String>>>>,
}

impl fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimiter")
            .field("min_interval", &self.min_interval)
            .field("tracked_keys", &self.tracked_keys())
            .finish()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

impl RateLimiter {
    /// Create a limiter from config.
    pub fn new(config: RateLimitConfig) -> Self {
        let quota = quota_for(config.min_interval);
        Self {
            min_interval: config.min_interval,
            quota,
            keyed: RwLock::new(quota.map(|quota| Arc::new(GovernorRateLimiter::keyed(quota)))),
        }
    }

    /// Configured spacing.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until `key` may start another request and claim that start.
    ///
    /// The wait holds no lock and can be cancelled by dropping the future.
    pub async fn acquire(&self, key: &str) -> RateLimitPermit {
        let key = key.to_string();
        if let Some(limiter) = self.limiter() {
            if limiter.check_key(&key).is_err() {
                trace!(key = %key, "Waiting for rate limit slot");
                limiter.until_key_ready(&key).await;
            }
        }
        RateLimitPermit {
            key,
            started_at: Instant::now(),
        }
    }

    /// Number of keys with live state.
    pub fn tracked_keys(&self) -> usize {
        self.limiter().map_or(0, |limiter| limiter.len())
    }

    /// Drop all per-key state.
    pub fn clear(&self) {
        let fresh = self
            .quota
            .map(|quota| Arc::new(GovernorRateLimiter::keyed(quota)));
        match self.keyed.write() {
            Ok(mut guard) => *guard = fresh,
            Err(poisoned) => *poisoned.into_inner() = fresh,
        }
    }

    fn limiter(&self) -> Option<Arc<DefaultKeyedRateLimiter<String>>> {
        // The slot only holds an Arc, so a poisoned lock is still usable.
        match self.keyed.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
