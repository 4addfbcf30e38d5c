use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::thread;

pub type Limiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// A shared limiter allowing `requests` calls per minute.
pub fn per_minute_limiter(requests: NonZeroU32) -> Limiter {
    Arc::new(RateLimiter::direct(Quota::per_minute(requests)))
}

/// Blocks the current thread until the limiter admits one more request.
pub fn wait(limiter: &Limiter) {
    let clock = DefaultClock::default();
    while let Err(not_until) = limiter.check() {
        let delay = not_until.wait_time_from(clock.now());
        log::debug!("Rate limited, sleeping for {:?}", delay);
        thread::sleep(delay);
    }
}
