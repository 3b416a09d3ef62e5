//! Inbound message channel
//!
//! Transports push everything they learn about the timer into one channel;
//! the dispatch task drains it in arrival order, so at most one message is
//! ever being applied to the stopwatch.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;

use splitwatch_core::ConnectionStatus;
use splitwatch_protocol::{DecodeError, Notification};

/// Channel capacity for inbound messages
pub const INBOX_CAPACITY: usize = 16;

/// Something the transport observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Inbound {
    /// A decoded notification
    Notification(Notification),
    /// A notification payload that failed to decode
    Malformed(DecodeError),
    /// Link status changed
    Connection(ConnectionStatus),
}

impl Inbound {
    /// Decode a raw notification payload
    ///
    /// Never fails: undecodable payloads become [`Inbound::Malformed`] so the
    /// dispatcher can log and discard them in order with everything else.
    pub fn from_payload(payload: &[u8]) -> Self {
        match Notification::decode(payload) {
            Ok(notification) => Inbound::Notification(notification),
            Err(e) => Inbound::Malformed(e),
        }
    }
}

impl From<ConnectionStatus> for Inbound {
    fn from(status: ConnectionStatus) -> Self {
        Inbound::Connection(status)
    }
}

/// Single-consumer queue between transport and dispatcher
pub type Inbox<M> = Channel<M, Inbound, INBOX_CAPACITY>;

/// Queue a raw notification payload, waiting while the inbox is full
pub async fn push_payload<M: RawMutex>(inbox: &Inbox<M>, payload: &[u8]) {
    push(inbox, Inbound::from_payload(payload)).await
}

/// Queue a message, waiting while the inbox is full
///
/// Nothing is ever dropped: a transport that outruns the dispatcher is held
/// back until a slot frees up.
pub async fn push<M: RawMutex>(inbox: &Inbox<M>, message: Inbound) {
    if inbox.is_full() {
        debug!("Inbox full, waiting to queue {:?}", message);
    }
    inbox.send(message).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use embassy_futures::block_on;
    use embassy_futures::join::join;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use splitwatch_protocol::{EventRecord, RemoteEventKind};

    #[test]
    fn test_from_payload_event() {
        let inbound = Inbound::from_payload(br#"{"event":2,"time_ms":10412}"#);
        assert_eq!(
            inbound,
            Inbound::Notification(Notification::Event(EventRecord::new(
                RemoteEventKind::LapOne,
                10_412
            )))
        );
    }

    #[test]
    fn test_from_payload_malformed() {
        assert_eq!(
            Inbound::from_payload(b"not json"),
            Inbound::Malformed(DecodeError::InvalidJson)
        );
        assert_eq!(
            Inbound::from_payload(b""),
            Inbound::Malformed(DecodeError::Empty)
        );
    }

    #[test]
    fn test_push_waits_for_room() {
        let inbox: Inbox<NoopRawMutex> = Channel::new();
        let received = RefCell::new(Vec::new());

        // Start, 20 laps, a stop and a link loss: more than the inbox holds
        let producer = async {
            push_payload(&inbox, br#"{"event":1,"time_ms":0}"#).await;
            for _ in 0..20 {
                push_payload(&inbox, br#"{"event":2,"time_ms":100}"#).await;
            }
            push_payload(&inbox, br#"{"event":5,"time_ms":9000}"#).await;
            push(&inbox, ConnectionStatus::Disconnected.into()).await;
        };
        let consumer = async {
            while received.borrow().len() < 23 {
                let inbound = inbox.receive().await;
                received.borrow_mut().push(inbound);
            }
        };
        block_on(join(producer, consumer));

        let received = received.into_inner();
        assert_eq!(received.len(), 23);
        assert_eq!(
            received[21],
            Inbound::Notification(Notification::Event(EventRecord::new(
                RemoteEventKind::Stopped,
                9_000
            )))
        );
        assert_eq!(
            received[22],
            Inbound::Connection(ConnectionStatus::Disconnected)
        );
        assert!(inbox.is_empty());
    }
}
