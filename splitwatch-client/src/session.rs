//! Client session
//!
//! Owns the [`Stopwatch`] behind a blocking mutex, plus the clock and the
//! transport. The dispatch task, the refresh task, and UI command handlers
//! all share one `&Session`; the mutex is only ever held for the duration
//! of a synchronous closure, never across an await.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use splitwatch_core::{
    ClientError, ConnectionStatus, RunState, Snapshot, Stopwatch, TimeSource,
};
use splitwatch_protocol::{Command, Notification};

use crate::channels::Inbound;
use crate::transport::Transport;

/// Shared client context
pub struct Session<M: RawMutex, C: TimeSource, T: Transport> {
    stopwatch: Mutex<M, RefCell<Stopwatch>>,
    clock: C,
    transport: T,
}

impl<M: RawMutex, C: TimeSource, T: Transport> Session<M, C, T> {
    /// Create a session with an idle, disconnected stopwatch
    pub fn new(clock: C, transport: T) -> Self {
        Self {
            stopwatch: Mutex::new(RefCell::new(Stopwatch::new())),
            clock,
            transport,
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut Stopwatch) -> R) -> R {
        self.stopwatch.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Apply one inbound message
    ///
    /// Errors are already logged here; callers may ignore them.
    /// `ConnectionLost` means a run was discarded by a disconnect.
    pub fn handle(&self, inbound: Inbound) -> Result<(), ClientError> {
        match inbound {
            Inbound::Notification(Notification::Event(record)) => {
                let now = self.clock.now_ms();
                debug!("Event {:?} at {} ms", record.kind, record.time_ms);
                match self.with(|sw| sw.dispatch(record, now)) {
                    Ok(state) => {
                        trace!("Run state now {:?}", state);
                        Ok(())
                    }
                    Err(e) => {
                        warn!("Event {:?} not recorded: {:?}", record.kind, e);
                        Err(e)
                    }
                }
            }
            Inbound::Notification(Notification::Unknown { code, .. }) => {
                debug!("Ignoring unknown event code {}", code);
                Ok(())
            }
            Inbound::Malformed(e) => {
                warn!("Discarding malformed notification: {:?}", e);
                Err(ClientError::MalformedEvent)
            }
            Inbound::Connection(status) => {
                info!("Connection: {:?}", status);
                if self.with(|sw| sw.on_connection(status)) {
                    warn!("Link lost, run discarded");
                    Err(ClientError::ConnectionLost)
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Send a command to the timer
    ///
    /// Refused with `NotConnected` (no write issued) unless the link is up.
    /// A failed write is reported once and never retried.
    pub async fn send(&self, command: Command) -> Result<(), ClientError> {
        let command = self.with(|sw| sw.check_command(command)).map_err(|e| {
            warn!("Not sending {:?}: {:?}", command, e);
            e
        })?;

        debug!("Sending {:?}", command);
        self.transport
            .write(command.as_bytes())
            .await
            .map_err(|e| {
                warn!("Command {:?} failed: {:?}", command, e);
                ClientError::TransportWriteFailed
            })
    }

    /// Run one display tick
    ///
    /// Returns a snapshot only if something visible changed since the last
    /// one was taken.
    pub fn refresh(&self) -> Option<Snapshot> {
        let now = self.clock.now_ms();
        self.with(|sw| {
            sw.refresh(now);
            sw.take_snapshot_if_dirty()
        })
    }

    /// Current display view, regardless of changes
    pub fn snapshot(&self) -> Snapshot {
        self.with(|sw| sw.snapshot())
    }

    /// Elapsed time right now, without publishing it
    pub fn current_elapsed(&self) -> u64 {
        let now = self.clock.now_ms();
        self.with(|sw| sw.current_elapsed(now))
    }

    pub fn run_state(&self) -> RunState {
        self.with(|sw| sw.run_state())
    }

    pub fn connection(&self) -> ConnectionStatus {
        self.with(|sw| sw.connection())
    }

    /// Check if the display refresh task is live
    pub fn is_refreshing(&self) -> bool {
        self.with(|sw| sw.is_refreshing())
    }

    /// Offer the current view again on the next frame
    ///
    /// For sinks that failed to show the last snapshot.
    pub fn mark_dirty(&self) {
        self.with(|sw| sw.mark_dirty())
    }
}
