use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Per-email cap on how often a code can be requested.
pub struct OtpLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
}

impl OtpLimiter {
    pub fn new(quota: Quota) -> Self {
        Self {
            limiter: RateLimiter::keyed(quota),
        }
    }

    pub fn per_minute(requests: u32) -> Self {
        let burst = NonZeroU32::new(requests).unwrap_or(NonZeroU32::MIN);
        Self::new(Quota::per_minute(burst))
    }

    /// Consume one slot for `email`; `false` once the quota is spent.
    pub fn try_acquire(&self, email: &str) -> bool {
        self.limiter
            .check_key(&email.to_ascii_lowercase())
            .is_ok()
    }

    /// Drop emails whose quota has fully replenished.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of emails currently tracked.
    pub fn len(&self) -> usize {
        self.limiter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limiter.is_empty()
    }
}

/// Prune `limiter` every `every` until the runtime shuts down.
pub fn spawn_pruner(limiter: Arc<OtpLimiter>, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let before = limiter.len();
            limiter.prune();
            debug!(before, after = limiter.len(), "pruned OTP rate limiter");
        }
    });
}
