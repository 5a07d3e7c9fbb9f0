//! Request pacing policies.

use std::thread;
use std::time::Duration;

/// Politeness policy consulted before every listing request.
pub trait Throttle: Send + Sync {
    /// Block the calling thread until the next request may be issued.
    fn wait(&self);
}

/// Sleep a fixed interval before each request, including the first.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Throttle for FixedDelay {
    fn wait(&self) {
        if !self.delay.is_zero() {
            log::debug!("Waiting {:?} before next request", self.delay);
            thread::sleep(self.delay);
        }
    }
}
