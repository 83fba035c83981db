//! Fixed inter-request delay that keeps the pipeline under the E-utilities
//! rate ceilings (3 req/s anonymous, 10 req/s with an API key).

use std::time::Duration;
use tracing::debug;

/// Lowest delay allowed without an API key (3 requests per second).
pub const MIN_ANONYMOUS_DELAY: Duration = Duration::from_millis(334);
/// Lowest delay allowed with an API key (10 requests per second).
pub const MIN_KEYED_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    with_key: Duration,
    without_key: Duration,
}

impl Default for Throttle {
    fn default() -> Self {
        Self {
            with_key: MIN_KEYED_DELAY,
            without_key: Duration::from_millis(400),
        }
    }
}

impl Throttle {
    /// Configured delays are raised to the service ceilings when lower.
    pub fn new(with_key: Duration, without_key: Duration) -> Self {
        Self {
            with_key: with_key.max(MIN_KEYED_DELAY),
            without_key: without_key.max(MIN_ANONYMOUS_DELAY),
        }
    }

    pub fn delay(&self, authenticated: bool) -> Duration {
        if authenticated { self.with_key } else { self.without_key }
    }

    /// Sleep after a network call.
    pub async fn pause(&self, authenticated: bool) {
        let delay = self.delay(authenticated);
        debug!(delay_ms = delay.as_millis() as u64, "Rate-limit pause");
        tokio::time::sleep(delay).await;
    }
}
