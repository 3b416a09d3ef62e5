//! Stopwatch context
//!
//! Single owner of everything the client knows about the remote run:
//! link status, run state, time sync, and the lap log. Events are applied
//! one at a time in arrival order, so no locking is needed inside.

use splitwatch_protocol::{Command, EventRecord, RemoteEventKind};

use crate::connection::ConnectionStatus;
use crate::error::ClientError;
use crate::laps::{LapLabel, LapLog};
use crate::state::RunState;
use crate::time::TimeSync;

/// Display-facing view of the stopwatch
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    pub elapsed_ms: u64,
    pub run_state: RunState,
    pub laps: LapLog,
    pub connection: ConnectionStatus,
}

/// Mirror of the remote timer
#[derive(Debug, Clone)]
pub struct Stopwatch {
    connection: ConnectionStatus,
    run_state: RunState,
    time: TimeSync,
    laps: LapLog,
    /// Something the display shows has changed since the last snapshot
    dirty: bool,
}

impl Stopwatch {
    /// Create an idle, disconnected stopwatch
    pub fn new() -> Self {
        Self {
            connection: ConnectionStatus::Disconnected,
            run_state: RunState::Idle,
            time: TimeSync::new(),
            laps: LapLog::new(),
            dirty: true,
        }
    }

    /// Apply one device event
    ///
    /// Returns the new run state. A mark refused because the lap log is full
    /// is reported as `Err(ClientError::LapLogFull)`; the state transition
    /// and timing side effects are applied regardless.
    pub fn dispatch(&mut self, record: EventRecord, now_ms: u64) -> Result<RunState, ClientError> {
        let next = self.run_state.transition(record);
        let mut logged = Ok(());

        match record.kind {
            RemoteEventKind::Started => {
                self.laps.clear();
                self.time.on_start(record.time_ms, now_ms);
            }
            RemoteEventKind::LapOne | RemoteEventKind::LapTwo | RemoteEventKind::Finished => {
                if let Some(label) = LapLabel::from_kind(record.kind) {
                    logged = self.laps.append(label, record.time_ms).map(|_| ());
                }
                if record.kind == RemoteEventKind::Finished {
                    self.time.halt();
                }
            }
            RemoteEventKind::Stopped => self.time.on_stop(record.time_ms),
            RemoteEventKind::Reset => self.clear_run(),
        }

        self.run_state = next;
        self.dirty = true;
        logged.map(|()| next)
    }

    /// Apply a link status change from the transport
    ///
    /// Losing the link discards the run, since no further authoritative
    /// events can arrive for it. Returns true if a run (or its result) was
    /// discarded.
    pub fn on_connection(&mut self, status: ConnectionStatus) -> bool {
        let had_run = self.run_state != RunState::Idle || !self.laps.is_empty();
        if self.connection != status {
            self.connection = status;
            self.dirty = true;
        }

        if status == ConnectionStatus::Disconnected {
            self.clear_run();
            had_run
        } else {
            false
        }
    }

    /// Check whether `command` may be written to the transport
    pub fn check_command(&self, command: Command) -> Result<Command, ClientError> {
        if self.connection.is_connected() {
            Ok(command)
        } else {
            Err(ClientError::NotConnected)
        }
    }

    /// Run one display refresh tick
    ///
    /// Returns the published elapsed time, or `None` when no run is live.
    pub fn refresh(&mut self, now_ms: u64) -> Option<u64> {
        let before = self.time.published_ms();
        let published = self.time.tick(now_ms)?;
        if published != before {
            self.dirty = true;
        }
        Some(published)
    }

    /// Elapsed time at `now_ms` without publishing it
    pub fn current_elapsed(&self, now_ms: u64) -> u64 {
        self.time.current_elapsed(now_ms)
    }

    /// Current view for the display
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            elapsed_ms: self.time.published_ms(),
            run_state: self.run_state,
            laps: self.laps.clone(),
            connection: self.connection,
        }
    }

    /// Current view, only if it changed since the last call
    pub fn take_snapshot_if_dirty(&mut self) -> Option<Snapshot> {
        if core::mem::replace(&mut self.dirty, false) {
            Some(self.snapshot())
        } else {
            None
        }
    }

    /// Force the next `take_snapshot_if_dirty` to return a snapshot
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn connection(&self) -> ConnectionStatus {
        self.connection
    }

    pub fn laps(&self) -> &LapLog {
        &self.laps
    }

    pub fn time(&self) -> &TimeSync {
        &self.time
    }

    /// Check if the display refresh task is live
    pub fn is_refreshing(&self) -> bool {
        self.time.refresh().is_scheduled()
    }

    /// Back to idle: refresh cancelled, log cleared, display zeroed
    fn clear_run(&mut self) {
        self.time.reset();
        self.laps.clear();
        self.run_state = RunState::Idle;
        self.dirty = true;
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}
