//! The simulation clock handed to update/draw hooks.

use std::time::Duration;

/// Elapsed and total simulation time for one tick.
///
/// `delta` is the time covered by the current tick, `total` the accumulated
/// simulation time since the system started.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickTime {
    delta: Duration,
    total: Duration,
    tick: u64,
}

impl TickTime {
    /// A zeroed clock, before the first tick.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delta: Duration::ZERO,
            total: Duration::ZERO,
            tick: 0,
        }
    }

    /// Advances the clock by one tick of `delta`.
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.total += delta;
        self.tick += 1;
    }

    /// Time covered by the current tick.
    #[must_use]
    pub const fn delta(&self) -> Duration {
        self.delta
    }

    /// Total simulation time.
    #[must_use]
    pub const fn total(&self) -> Duration {
        self.total
    }

    /// Number of ticks advanced so far.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }
}
