//! Manually pumped frame clock

use crate::game::FrameClock;

/// Records tick requests; the driver decides when to deliver them
#[derive(Debug, Default)]
pub struct ManualClock {
    pending: bool,
    requests: u64,
}

impl ManualClock {
    /// Consume the pending request, if any
    pub fn take_tick(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Total requests seen
    pub fn requests(&self) -> u64 {
        self.requests
    }
}

impl FrameClock for ManualClock {
    fn request_tick(&mut self) {
        self.pending = true;
        self.requests += 1;
    }
}
