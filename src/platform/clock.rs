//! Fixed-rate frame limiter

use std::time::{Duration, Instant};

/// Hands out one tick per frame period.
///
/// Falling behind by more than a period re-anchors the schedule at the
/// current time, so a stall never turns into a burst of catch-up ticks.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    period: Duration,
    next: Instant,
}

impl FrameLimiter {
    /// Limiter for `rate` ticks per second, first tick due at `now`
    pub fn new(rate: u32, now: Instant) -> Self {
        Self {
            period: Duration::from_secs(1) / rate.max(1),
            next: now,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// When the next tick is due
    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Take the tick due at `now`, if any
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.period;
        if now >= self.next {
            log::debug!("Frame loop stalled, re-anchoring");
            self.next = now + self.period;
        }
        true
    }
}
