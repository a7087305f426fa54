//! Outbound request spacing
//!
//! One limiter is shared by every tool. It owns the timestamp of the last
//! outbound call and hands out slots at least `min_interval` apart.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::trace;

/// Enforces a minimum spacing between outbound requests
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: Mutex::new(None),
        }
    }

    /// Wait for the next slot and record it.
    ///
    /// The lock is held across the sleep, so concurrent callers are served one
    /// at a time in lock-acquisition order and each one measures against the
    /// timestamp recorded by its predecessor. Returns the recorded instant.
    pub async fn wait(&self) -> Instant {
        let mut last = self.last.lock().await;

        if let Some(previous) = *last {
            let ready_at = previous + self.min_interval;
            if Instant::now() < ready_at {
                trace!(
                    delay_ms = (ready_at - Instant::now()).as_millis() as u64,
                    "Rate limiting outbound request"
                );
                sleep_until(ready_at).await;
            }
        }

        let now = Instant::now();
        *last = Some(now);
        now
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MIN_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_call_does_not_wait() {
        let limiter = RateLimiter::new(Duration::from_millis(200));
        let before = Instant::now();

        let recorded = limiter.wait().await;

        assert_eq!(recorded, before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_to_back_calls_are_spaced() {
        let limiter = RateLimiter::new(Duration::from_millis(200));

        let mut stamps = Vec::new();
        for _ in 0..5 {
            stamps.push(limiter.wait().await);
        }

        for pair in stamps.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(200));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_after_interval_already_elapsed() {
        let limiter = RateLimiter::new(Duration::from_millis(200));
        limiter.wait().await;

        tokio::time::advance(Duration::from_millis(500)).await;
        let before = Instant::now();
        let recorded = limiter.wait().await;

        assert_eq!(recorded, before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_elapsed_waits_only_remainder() {
        let limiter = RateLimiter::new(Duration::from_millis(200));
        let first = limiter.wait().await;

        tokio::time::advance(Duration::from_millis(150)).await;
        let second = limiter.wait().await;

        assert_eq!(second - first, Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_never_waits() {
        let limiter = RateLimiter::new(Duration::ZERO);
        let a = limiter.wait().await;
        let b = limiter.wait().await;
        assert_eq!(a, b);
    }
}
