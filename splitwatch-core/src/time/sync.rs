//! Device elapsed-time tracking
//!
//! Maps local "now" onto the device's elapsed time:
//!
//! ```text
//! elapsed(now) = now - anchor.local_reference_ms + anchor.device_elapsed_ms
//! ```
//!
//! The anchor exists only while a run is live. Once the run ends the value
//! is frozen: to the device's own reading on stop (dropping any local
//! drift), or to the last published value when the goal is reached.

use super::refresh::RefreshTask;

/// Local instant paired with the device's elapsed reading at that instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Anchor {
    /// Local clock reading when the anchor was taken (ms)
    pub local_reference_ms: u64,
    /// Device elapsed time reported at that moment (ms)
    pub device_elapsed_ms: u64,
}

impl Anchor {
    /// Extrapolate device elapsed time at local instant `now_ms`
    ///
    /// A local clock reading earlier than the reference is treated as the
    /// reference itself.
    pub fn elapsed_at(&self, now_ms: u64) -> u64 {
        now_ms
            .saturating_sub(self.local_reference_ms)
            .saturating_add(self.device_elapsed_ms)
    }
}

/// Owner of the anchor, the frozen value, and the refresh handle
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeSync {
    anchor: Option<Anchor>,
    /// Value reported while no run is live
    frozen_ms: u64,
    /// Last value handed to the display
    published_ms: u64,
    refresh: RefreshTask,
}

impl TimeSync {
    /// Create an idle time sync reading zero
    pub const fn new() -> Self {
        Self {
            anchor: None,
            frozen_ms: 0,
            published_ms: 0,
            refresh: RefreshTask::new(),
        }
    }

    /// Anchor to a `Started` event and begin refreshing
    ///
    /// The device may already be mid-run (for example after a reconnect),
    /// so its reported elapsed value is absorbed rather than assuming zero.
    pub fn on_start(&mut self, device_elapsed_ms: u64, now_ms: u64) {
        self.anchor = Some(Anchor {
            local_reference_ms: now_ms,
            device_elapsed_ms,
        });
        self.published_ms = device_elapsed_ms;
        self.refresh.schedule();
    }

    /// Stop refreshing and freeze at the device's authoritative reading
    pub fn on_stop(&mut self, device_elapsed_ms: u64) {
        self.refresh.cancel();
        self.anchor = None;
        self.frozen_ms = device_elapsed_ms;
        self.published_ms = device_elapsed_ms;
    }

    /// Stop refreshing and keep whatever was last published
    pub fn halt(&mut self) {
        self.refresh.cancel();
        self.anchor = None;
        self.frozen_ms = self.published_ms;
    }

    /// Stop refreshing and zero the display
    pub fn reset(&mut self) {
        self.refresh.cancel();
        self.anchor = None;
        self.frozen_ms = 0;
        self.published_ms = 0;
    }

    /// Elapsed time at `now_ms`
    ///
    /// Extrapolated from the anchor while running, otherwise the frozen value.
    pub fn current_elapsed(&self, now_ms: u64) -> u64 {
        match self.anchor {
            Some(anchor) => anchor.elapsed_at(now_ms),
            None => self.frozen_ms,
        }
    }

    /// Run one refresh tick
    ///
    /// Returns the newly published value, or `None` if refreshing has been
    /// cancelled. A cancelled tick never touches the published value.
    pub fn tick(&mut self, now_ms: u64) -> Option<u64> {
        if !self.refresh.is_scheduled() {
            return None;
        }
        let elapsed = self.current_elapsed(now_ms);
        self.published_ms = elapsed;
        Some(elapsed)
    }

    /// Last value handed to the display
    pub fn published_ms(&self) -> u64 {
        self.published_ms
    }

    /// Current anchor, present only while running
    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    /// Refresh handle
    pub fn refresh(&self) -> &RefreshTask {
        &self.refresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_absorbs_device_elapsed() {
        let mut sync = TimeSync::new();
        sync.on_start(5_000, 100_000);
        assert_eq!(sync.current_elapsed(100_000), 5_000);
        assert_eq!(sync.current_elapsed(102_000), 7_000);
    }

    #[test]
    fn test_clock_before_reference_does_not_underflow() {
        let mut sync = TimeSync::new();
        sync.on_start(300, 1_000);
        assert_eq!(sync.current_elapsed(900), 300);
    }

    #[test]
    fn test_stop_uses_device_value_not_extrapolation() {
        let mut sync = TimeSync::new();
        sync.on_start(0, 0);
        assert_eq!(sync.tick(10_050), Some(10_050));

        // Device says 10_000: local clock ran 50 ms fast
        sync.on_stop(10_000);
        assert_eq!(sync.current_elapsed(20_000), 10_000);
        assert_eq!(sync.published_ms(), 10_000);
        assert!(!sync.refresh().is_scheduled());
        assert!(sync.anchor().is_none());
    }

    #[test]
    fn test_tick_after_stop_is_ignored() {
        let mut sync = TimeSync::new();
        sync.on_start(0, 0);
        sync.on_stop(4_000);
        assert_eq!(sync.tick(9_000), None);
        assert_eq!(sync.published_ms(), 4_000);
    }

    #[test]
    fn test_halt_keeps_last_published() {
        let mut sync = TimeSync::new();
        sync.on_start(0, 0);
        sync.tick(29_980);
        sync.halt();
        assert_eq!(sync.current_elapsed(40_000), 29_980);
        assert_eq!(sync.tick(40_000), None);
        assert_eq!(sync.published_ms(), 29_980);
    }

    #[test]
    fn test_reset_zeroes() {
        let mut sync = TimeSync::new();
        sync.on_start(1_000, 0);
        sync.tick(500);
        sync.reset();
        assert_eq!(sync.current_elapsed(10_000), 0);
        assert_eq!(sync.published_ms(), 0);
        assert!(!sync.refresh().is_scheduled());
    }
}
