use std::thread;
use std::time::{Duration, Instant};

/// Time source for the main loop: a high-resolution monotonic counter with
/// its frequency, a coarse millisecond timestamp, and the cooperative sleep.
pub trait Clock {
    fn counter(&self) -> u64;
    fn frequency(&self) -> u64;
    fn millis(&self) -> u64;
    fn sleep(&self, duration: Duration);
}

const NANOS_PER_SECOND: u64 = 1_000_000_000;

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn counter(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    fn frequency(&self) -> u64 {
        NANOS_PER_SECOND
    }

    fn millis(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.counter();
        clock.sleep(Duration::from_millis(1));
        let second = clock.counter();

        assert!(second > first);
        assert_eq!(clock.frequency(), NANOS_PER_SECOND);
    }
}
