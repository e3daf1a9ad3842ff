use rand::Rng;
use std::time::Duration;

/// Statuses the client retries without looking at the body.
pub const RETRIABLE_STATUSES: [u16; 3] = [500, 503, 504];

/// Exponential backoff bounded by a total retry window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Time after the first attempt beyond which no retry is started.
    pub retry_timeout: Duration,
    /// Delay before the first retry, before jitter.
    pub base_delay: Duration,
    /// Growth factor applied per retry.
    pub multiplier: f64,
    /// Whether `RESOURCE_EXHAUSTED` answers are retried.
    pub retry_over_query_limit: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retry_timeout: Duration::from_secs(60),
            base_delay: Duration::from_millis(500),
            multiplier: 1.5,
            retry_over_query_limit: true,
        }
    }
}

impl RetryPolicy {
    pub fn is_retriable_status(status_code: u16) -> bool {
        RETRIABLE_STATUSES.contains(&status_code)
    }

    /// Delay before retry number `retry` (1-based), without jitter.
    ///
    /// Never longer than `retry_timeout`, which also stands in when the
    /// multiplier yields a negative or non-finite delay.
    pub fn backoff(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(32) as i32;
        self.scale(self.base_delay, self.multiplier.powi(exponent))
    }

    /// [`backoff`](Self::backoff) scaled by a random factor in `[0.5, 1.5)`.
    pub fn delay<R: Rng>(&self, retry: u32, rng: &mut R) -> Duration {
        self.scale(self.backoff(retry), rng.gen_range(0.5..1.5))
    }

    fn scale(&self, duration: Duration, factor: f64) -> Duration {
        Duration::try_from_secs_f64(duration.as_secs_f64() * factor)
            .map_or(self.retry_timeout, |scaled| scaled.min(self.retry_timeout))
    }
}
