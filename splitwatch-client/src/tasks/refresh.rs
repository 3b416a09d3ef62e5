//! Display refresh task
//!
//! Driven by display frames rather than a free-running timer. Each frame
//! publishes the current elapsed time (only while a run is live) and hands
//! the sink a snapshot if anything visible changed.

use core::future::Future;

use embassy_sync::blocking_mutex::raw::RawMutex;

use splitwatch_core::TimeSource;

use crate::display::DisplaySink;
use crate::session::Session;
use crate::transport::Transport;

/// Source of display frames
pub trait FrameSource {
    /// Wait for the next frame
    fn next_frame(&mut self) -> impl Future<Output = ()>;
}

/// Refresh task - one refresh per frame, forever
pub async fn run_refresh<M, C, T, F, D>(session: &Session<M, C, T>, frames: &mut F, sink: &mut D)
where
    M: RawMutex,
    C: TimeSource,
    T: Transport,
    F: FrameSource,
    D: DisplaySink,
{
    info!("Refresh task started");

    loop {
        frames.next_frame().await;
        refresh_once(session, sink);
    }
}

/// Run one frame
///
/// Returns true if the sink was handed a snapshot. A snapshot the sink
/// failed to show is offered again on the next frame.
pub fn refresh_once<M, C, T, D>(session: &Session<M, C, T>, sink: &mut D) -> bool
where
    M: RawMutex,
    C: TimeSource,
    T: Transport,
    D: DisplaySink,
{
    let Some(snapshot) = session.refresh() else {
        return false;
    };
    if let Err(e) = sink.show(&snapshot) {
        warn!("Display update failed: {:?}", e);
        session.mark_dirty();
    }
    true
}
