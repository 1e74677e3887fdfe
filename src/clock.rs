use std::time::Instant;

/// Monotonic millisecond time source, injected everywhere a deadline is
/// checked. The core only ever reads it.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// Wall clock backed by `std::time::Instant`, measured from construction.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> SystemClock {
        SystemClock {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}
