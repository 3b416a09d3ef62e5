//! Display refresh task handle
//!
//! The refresh work itself is driven from outside (a display tick). This
//! handle only records whether that work may still publish. Cancelling is
//! synchronous, so a tick that runs after a stop or reset sees the handle
//! cancelled and leaves the frozen value alone.

/// Cancellable handle for the repeating display refresh
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RefreshTask {
    scheduled: bool,
}

impl RefreshTask {
    /// Create an unscheduled handle
    pub const fn new() -> Self {
        Self { scheduled: false }
    }

    /// Schedule refreshing for a new run
    ///
    /// Scheduling an already scheduled task leaves a single schedule.
    pub fn schedule(&mut self) {
        self.scheduled = true;
    }

    /// Cancel refreshing
    ///
    /// Safe to call on a task that is not scheduled. Returns true if a
    /// scheduled task was actually cancelled.
    pub fn cancel(&mut self) -> bool {
        core::mem::replace(&mut self.scheduled, false)
    }

    /// Check if a tick may publish
    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }
}
