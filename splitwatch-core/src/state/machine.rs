//! State machine definition
//!
//! Display refresh is a function of the current state: it runs only in
//! `Running`.

use splitwatch_protocol::{EventRecord, RemoteEventKind};

/// Run states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    /// No run, display zeroed
    #[default]
    Idle,
    /// Run live, display extrapolated from the anchor
    Running,
    /// Goal reached, display holds the last refreshed value
    Finished,
    /// Stopped, display holds the device's reading at stop
    Stopped { at_ms: u64 },
}

impl RunState {
    /// Check if display refresh is allowed
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    /// Process an event and return the next state
    ///
    /// Marks never change state: a lap that arrives without an observed
    /// start is still logged, and the state stays where it was.
    pub fn transition(self, record: EventRecord) -> Self {
        match record.kind {
            // Any start begins a new run, including a start seen mid-run
            RemoteEventKind::Started => RunState::Running,
            RemoteEventKind::LapOne | RemoteEventKind::LapTwo => self,
            RemoteEventKind::Finished => RunState::Finished,
            RemoteEventKind::Stopped => RunState::Stopped {
                at_ms: record.time_ms,
            },
            RemoteEventKind::Reset => RunState::Idle,
        }
    }
}
