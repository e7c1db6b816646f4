use core::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

const LOG_TARGET: &str = "rate_limit";

/// Enforces a global requests-per-second ceiling.
///
/// Each call to [`RateLimiter::wait`] is an admission. Admissions are spaced at least
/// `1 / requests_per_second` apart no matter how many callers are waiting. The lock is
/// held across the sleep so that the check and the timestamp update happen as one step,
/// and since the lock is fair, callers are admitted in the order they arrived.
#[derive(Debug)]
pub struct RateLimiter {
    last_admission: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    /// Create a rate limiter admitting at most `requests_per_second` requests per second.
    ///
    /// A rate of zero is treated as one.
    #[must_use]
    pub fn new(requests_per_second: u32) -> Self {
        Self {
            last_admission: Mutex::new(None),
            min_interval: Duration::from_secs(1) / requests_per_second.max(1),
        }
    }

    /// Minimum spacing between two admissions.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until the next request is allowed, returning the instant it was admitted at.
    pub async fn wait(&self) -> Instant {
        let mut last_admission = self.last_admission.lock().await;

        if let Some(last) = *last_admission {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let delay = self.min_interval - elapsed;
                log::trace!(target: LOG_TARGET, "Delaying request admission by {}ms", delay.as_millis());
                tokio::time::sleep(delay).await;
            }
        }

        let now = Instant::now();
        *last_admission = Some(now);
        now
    }
}
