use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

/// Client-side request budget guarding a rate-limited provider.
///
/// Exhausting the budget never blocks or queues: the caller gets the wait time
/// back and is expected to fail over immediately.
#[derive(Clone)]
pub struct RequestBudget {
    limiter: Arc<DirectRateLimiter>,
    clock: DefaultClock,
    quota_window: Duration,
    quota_limit: u32,
}

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

impl RequestBudget {
    pub fn new(quota_window: Duration, quota_limit: u32) -> Self {
        let quota = quota_from_window(quota_window, quota_limit);
        let clock = DefaultClock::default();
        Self {
            limiter: Arc::new(RateLimiter::direct(quota)),
            clock,
            quota_window,
            quota_limit: quota_limit.max(1),
        }
    }

    /// Takes one unit of budget, or returns how long until one frees up.
    pub fn acquire(&self) -> Result<(), Duration> {
        self.limiter
            .check()
            .map_err(|not_until| not_until.wait_time_from(self.clock.now()))
    }

    pub const fn quota_window(&self) -> Duration {
        self.quota_window
    }

    pub const fn quota_limit(&self) -> u32 {
        self.quota_limit
    }
}

impl std::fmt::Debug for RequestBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBudget")
            .field("quota_window", &self.quota_window)
            .field("quota_limit", &self.quota_limit)
            .finish()
    }
}

fn quota_from_window(quota_window: Duration, quota_limit: u32) -> Quota {
    let safe_limit = quota_limit.max(1);
    let burst = NonZeroU32::new(safe_limit).expect("safe limit must be non-zero");

    let seconds_per_cell = (quota_window.as_secs_f64() / f64::from(safe_limit)).max(0.001);
    let period = Duration::from_secs_f64(seconds_per_cell);

    Quota::with_period(period)
        .expect("period is always greater than zero")
        .allow_burst(burst)
}
