//! Sliding-window rate limiting.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use thiserror::Error;

/// The limiter's lock was poisoned by a panicking holder.
///
/// Callers surface this as an internal fault rather than panicking the
/// request task.
#[derive(Debug, Error)]
#[error("rate limiter state lock poisoned")]
pub struct LimiterPoisoned;

/// An in-memory sliding-window rate limiter keyed by scope string.
///
/// Each scope key ("global", "ip:1.2.3.4", "user:42") maps to the
/// timestamps of its requests inside the trailing window. Entries older
/// than the window are purged lazily on each check. The map is shared
/// across worker tasks, so access goes through a mutex.
pub struct SlidingWindowLimiter {
    records: Mutex<HashMap<String, Vec<Instant>>>,
}

impl SlidingWindowLimiter {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Check whether a request under `key` is allowed.
    ///
    /// Allows and records the request iff fewer than `limit` requests
    /// were recorded inside the trailing `window`.
    pub fn allow(
        &self,
        key: &str,
        limit: usize,
        window: Duration,
    ) -> Result<bool, LimiterPoisoned> {
        self.allow_at(key, limit, window, Instant::now())
    }

    /// Clock-injected variant of [`allow`](Self::allow).
    ///
    /// `now` must be monotonically non-decreasing across calls for a key.
    pub fn allow_at(
        &self,
        key: &str,
        limit: usize,
        window: Duration,
        now: Instant,
    ) -> Result<bool, LimiterPoisoned> {
        let mut records = self.records.lock().map_err(|_| LimiterPoisoned)?;
        let timestamps = records.entry(key.to_string()).or_default();

        timestamps.retain(|t| now.duration_since(*t) < window);

        if timestamps.len() >= limit {
            return Ok(false);
        }

        timestamps.push(now);
        Ok(true)
    }
}

impl Default for SlidingWindowLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the limiter key for a client IP.
pub fn ip_key(addr: &std::net::IpAddr) -> String {
    format!("ip:{}", addr)
}

/// Build the limiter key for a user id, falling back to "anonymous".
pub fn user_key(uid: Option<&str>) -> String {
    format!("user:{}", uid.unwrap_or("anonymous"))
}
