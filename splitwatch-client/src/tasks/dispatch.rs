//! Inbound dispatch task
//!
//! The only consumer of the inbox. Messages are applied one at a time in
//! arrival order; a failed message is logged by the session and skipped.

use embassy_sync::blocking_mutex::raw::RawMutex;

use splitwatch_core::TimeSource;

use crate::channels::Inbox;
use crate::session::Session;
use crate::transport::Transport;

/// Dispatch task - drains the inbox forever
pub async fn run_dispatch<M, C, T>(session: &Session<M, C, T>, inbox: &Inbox<M>)
where
    M: RawMutex,
    C: TimeSource,
    T: Transport,
{
    info!("Dispatch task started");

    loop {
        let inbound = inbox.receive().await;
        let _ = session.handle(inbound);
    }
}

/// Apply everything currently queued, without waiting
///
/// Returns the number of messages applied.
pub fn dispatch_pending<M, C, T>(session: &Session<M, C, T>, inbox: &Inbox<M>) -> usize
where
    M: RawMutex,
    C: TimeSource,
    T: Transport,
{
    let mut count = 0;
    while let Ok(inbound) = inbox.try_receive() {
        let _ = session.handle(inbound);
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_futures::select::{select, Either};
    use embassy_sync::channel::Channel;
    use splitwatch_core::{ConnectionStatus, LapLabel, MockTime, RunState};

    use crate::channels::{push, push_payload};
    use crate::session::tests::{RecordingTransport, TestSession};

    #[test]
    fn test_lap_sequence_in_arrival_order() {
        let clock = MockTime::new();
        let transport = RecordingTransport::default();
        let session: TestSession = Session::new(&clock, &transport);
        let inbox = Channel::new();

        block_on(async {
            push(&inbox, ConnectionStatus::Connected.into()).await;
            push_payload(&inbox, br#"{"event":1,"time_ms":0}"#).await;
            push_payload(&inbox, br#"{"event":2,"time_ms":10000}"#).await;
            push_payload(&inbox, br#"{"event":3,"time_ms":20000}"#).await;
            push_payload(&inbox, br#"{"event":4,"time_ms":30000}"#).await;
        });

        assert_eq!(dispatch_pending(&session, &inbox), 5);
        assert_eq!(dispatch_pending(&session, &inbox), 0);

        let snapshot = session.snapshot();
        let laps: Vec<_> = snapshot
            .laps
            .iter()
            .map(|r| (r.sequence, r.label, r.elapsed_ms))
            .collect();
        assert_eq!(
            laps,
            [
                (1, LapLabel::Lap1, 10_000),
                (2, LapLabel::Lap2, 20_000),
                (3, LapLabel::Goal, 30_000),
            ]
        );
        assert_eq!(snapshot.run_state, RunState::Finished);
        assert!(!session.is_refreshing());
    }

    #[test]
    fn test_malformed_payload_does_not_stop_dispatch() {
        let clock = MockTime::new();
        let transport = RecordingTransport::default();
        let session: TestSession = Session::new(&clock, &transport);
        let inbox = Channel::new();

        block_on(async {
            push_payload(&inbox, b"\xff\xfe").await;
            push_payload(&inbox, br#"{"event":2,"time_ms":5000}"#).await;
        });

        assert_eq!(dispatch_pending(&session, &inbox), 2);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.run_state, RunState::Idle);
        assert_eq!(snapshot.laps.len(), 1);
        assert_eq!(snapshot.laps.last().map(|r| r.elapsed_ms), Some(5_000));
    }

    #[test]
    fn test_run_dispatch_drains_inbox() {
        let clock = MockTime::new();
        let transport = RecordingTransport::default();
        let session: TestSession = Session::new(&clock, &transport);
        let inbox = Channel::new();

        block_on(async {
            push(&inbox, ConnectionStatus::Connected.into()).await;
            push_payload(&inbox, br#"{"event":1,"time_ms":2500}"#).await;
        });

        let done = block_on(select(run_dispatch(&session, &inbox), async {
            while !inbox.is_empty() {
                embassy_futures::yield_now().await;
            }
        }));
        assert!(matches!(done, Either::Second(())));
        assert_eq!(session.run_state(), RunState::Running);
        assert_eq!(session.snapshot().elapsed_ms, 2_500);
    }

    #[test]
    fn test_burst_larger_than_inbox_is_applied_in_full() {
        let clock = MockTime::new();
        let transport = RecordingTransport::default();
        let session: TestSession = Session::new(&clock, &transport);
        let inbox = Channel::new();

        let producer = async {
            push(&inbox, ConnectionStatus::Connected.into()).await;
            push_payload(&inbox, br#"{"event":1,"time_ms":0}"#).await;
            for lap in 1..=20u64 {
                let payload = format!(r#"{{"event":2,"time_ms":{}}}"#, lap * 400);
                push_payload(&inbox, payload.as_bytes()).await;
            }
            push_payload(&inbox, br#"{"event":5,"time_ms":9000}"#).await;
            while !inbox.is_empty() {
                embassy_futures::yield_now().await;
            }
        };
        let done = block_on(select(run_dispatch(&session, &inbox), producer));
        assert!(matches!(done, Either::Second(())));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.laps.len(), 20);
        assert_eq!(snapshot.laps.last().map(|r| r.sequence), Some(20));
        assert_eq!(snapshot.run_state, RunState::Stopped { at_ms: 9_000 });
        assert_eq!(snapshot.elapsed_ms, 9_000);
        assert!(!session.is_refreshing());
    }
}
