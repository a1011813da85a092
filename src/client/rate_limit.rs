//! Client-side rate limiting for outbound Marketing Cloud calls
//!
//! Every vendor POST waits on a single direct limiter. The limiter is always
//! on; the quota comes from configuration.

use std::num::NonZeroU32;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;

/// Requests-per-second throttle shared by all operations of one client
pub struct VendorRateLimiter {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    per_second: NonZeroU32,
}

impl VendorRateLimiter {
    /// A zero quota is treated as one request per second.
    pub fn new(per_second: u32) -> Self {
        let per_second = NonZeroU32::new(per_second).unwrap_or(NonZeroU32::MIN);

        Self {
            limiter: RateLimiter::direct(Quota::per_second(per_second)),
            per_second,
        }
    }

    /// Wait until a request may be sent.
    pub async fn until_ready(&self) {
        if self.limiter.check().is_err() {
            debug!("Rate limit of {}/s reached, waiting", self.per_second);
            self.limiter.until_ready().await;
        }
    }
}
