//! Local time and device-time synchronization
//!
//! The device is the authority for elapsed time. Locally we only keep an
//! [`Anchor`] pairing a local instant with the device's reading at that
//! instant, and extrapolate from it while a run is live.

pub mod refresh;
pub mod sync;

use core::cell::Cell;

pub use refresh::RefreshTask;
pub use sync::{Anchor, TimeSync};

/// Monotonic millisecond clock
pub trait TimeSource {
    /// Milliseconds since an arbitrary, fixed origin
    fn now_ms(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// Manually driven clock for host tests and simulations
#[derive(Debug, Default)]
pub struct MockTime {
    now_ms: Cell<u64>,
}

impl MockTime {
    /// Create a clock reading zero
    pub const fn new() -> Self {
        Self { now_ms: Cell::new(0) }
    }

    /// Create a clock reading `now_ms`
    pub const fn at(now_ms: u64) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.set(self.now_ms.get().saturating_add(delta_ms));
    }

    /// Jump to an absolute reading
    pub fn set(&self, now_ms: u64) {
        self.now_ms.set(now_ms);
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_time_advances() {
        let clock = MockTime::at(1_000);
        clock.advance(250);
        assert_eq!(clock.now_ms(), 1_250);
        clock.set(10);
        assert_eq!((&clock).now_ms(), 10);
    }

    #[test]
    fn test_mock_time_saturates() {
        let clock = MockTime::at(u64::MAX - 1);
        clock.advance(10);
        assert_eq!(clock.now_ms(), u64::MAX);
    }
}
