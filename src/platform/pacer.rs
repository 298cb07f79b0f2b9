//! Sleep-based fixed-rate pacer for the host build

use std::time::{Duration, Instant};

use super::Pacer;

/// Ticks at a fixed rate; falls back in step instead of bursting after a stall
#[derive(Debug)]
pub struct FixedPacer {
    period: Duration,
    next: Instant,
}

impl FixedPacer {
    pub fn new(rate_hz: u32) -> Self {
        let period = Duration::from_nanos(1_000_000_000 / u64::from(rate_hz.max(1)));
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Pacer for FixedPacer {
    fn wait_for_tick(&mut self) {
        let now = Instant::now();
        if now < self.next {
            std::thread::sleep(self.next - now);
            self.next += self.period;
        } else {
            // Missed at least one deadline
            self.next = now + self.period;
        }
    }
}
