//! Simulation clock
//!
//! Monotonic tick counter. Owned by the loop driver and passed explicitly
//! (as a [`Tick`]) into everything that needs time, so replays are exact.

/// One fixed-duration simulation step index
pub type Tick = u64;

#[derive(Debug, Clone)]
pub struct Clock {
    now: Tick,
    rate_hz: u32,
}

impl Clock {
    pub fn new(rate_hz: u32) -> Self {
        Self {
            now: 0,
            rate_hz: rate_hz.max(1),
        }
    }

    /// Current tick (0 before the first step)
    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn rate_hz(&self) -> u32 {
        self.rate_hz
    }

    /// Advance by one step and return the new tick
    pub fn advance(&mut self) -> Tick {
        self.now += 1;
        self.now
    }
}
