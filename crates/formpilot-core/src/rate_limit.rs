//! Minimum spacing between automation passes.

use std::time::{Duration, Instant};

use tracing::debug;

/// Enforces a minimum interval between consecutive acquisitions.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    min_interval: Duration,
    last: Option<Instant>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Time still to wait at `now` before the next acquisition is allowed.
    pub fn delay_until_ready(&self, now: Instant) -> Duration {
        match self.last {
            Some(last) => self
                .min_interval
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    /// Block until the interval has elapsed, then record the acquisition.
    pub fn acquire(&mut self) {
        let delay = self.delay_until_ready(Instant::now());
        if !delay.is_zero() {
            debug!("Rate limit: waiting {:?}", delay);
            std::thread::sleep(delay);
        }
        self.last = Some(Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::from_millis(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_acquire_is_immediate() {
        let limiter = RateLimiter::from_millis(500);
        assert_eq!(limiter.delay_until_ready(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn test_delay_shrinks_with_elapsed_time() {
        let mut limiter = RateLimiter::from_millis(500);
        limiter.acquire();
        let last = limiter.last.unwrap();

        assert_eq!(limiter.delay_until_ready(last), Duration::from_millis(500));
        assert_eq!(
            limiter.delay_until_ready(last + Duration::from_millis(200)),
            Duration::from_millis(300)
        );
        assert_eq!(
            limiter.delay_until_ready(last + Duration::from_secs(2)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_acquire_spaces_calls() {
        let mut limiter = RateLimiter::from_millis(30);
        let start = Instant::now();
        limiter.acquire();
        limiter.acquire();
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_zero_interval_never_waits() {
        let mut limiter = RateLimiter::from_millis(0);
        limiter.acquire();
        assert_eq!(limiter.delay_until_ready(Instant::now()), Duration::ZERO);
    }
}
