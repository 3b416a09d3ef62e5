//! Notification payload decoding
//!
//! The timer pushes one small UTF-8 JSON object per notification:
//! ```text
//! {"event": 2, "time_ms": 10412}
//! ```
//! Extra fields are ignored. An `event` code this crate does not know is
//! reported as [`Notification::Unknown`] rather than an error so newer
//! firmware can add events without breaking older clients.
//!
//! `time_ms` may be left out of a reset, or of an unknown event, since
//! neither reads it. Every other event must carry it.

use core::fmt;

use serde::Deserialize;

use crate::events::{EventRecord, RemoteEventKind};

/// Maximum notification payload accepted (BLE ATT payload ceiling)
pub const MAX_NOTIFICATION_LEN: usize = 512;

/// Errors that can occur while decoding a notification payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Payload was empty
    Empty,
    /// Payload exceeds `MAX_NOTIFICATION_LEN`
    TooLong,
    /// Payload is not valid UTF-8
    InvalidUtf8,
    /// Payload is not a JSON object with integer `event` and non-negative
    /// integer `time_ms` fields
    InvalidJson,
    /// An event that needs `time_ms` arrived without it
    MissingTime,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Empty => f.write_str("empty notification"),
            DecodeError::TooLong => f.write_str("notification too long"),
            DecodeError::InvalidUtf8 => f.write_str("notification is not UTF-8"),
            DecodeError::InvalidJson => f.write_str("notification is not a timing event"),
            DecodeError::MissingTime => f.write_str("timing event without time_ms"),
        }
    }
}

/// A well-formed notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notification {
    /// Recognised timing event
    Event(EventRecord),
    /// Well-formed payload carrying an event code we do not know
    Unknown { code: i64, time_ms: u64 },
}

#[derive(Deserialize)]
struct WirePayload {
    event: i64,
    #[serde(default)]
    time_ms: Option<u64>,
}

impl Notification {
    /// Decode a raw notification payload
    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        if payload.is_empty() {
            return Err(DecodeError::Empty);
        }
        if payload.len() > MAX_NOTIFICATION_LEN {
            return Err(DecodeError::TooLong);
        }

        let text = core::str::from_utf8(payload).map_err(|_| DecodeError::InvalidUtf8)?;
        let wire: WirePayload =
            serde_json::from_str(text.trim()).map_err(|_| DecodeError::InvalidJson)?;

        Ok(match RemoteEventKind::from_code(wire.event) {
            Some(RemoteEventKind::Reset) => Notification::Event(EventRecord::new(
                RemoteEventKind::Reset,
                wire.time_ms.unwrap_or(0),
            )),
            Some(kind) => {
                let time_ms = wire.time_ms.ok_or(DecodeError::MissingTime)?;
                Notification::Event(EventRecord::new(kind, time_ms))
            }
            None => Notification::Unknown {
                code: wire.event,
                time_ms: wire.time_ms.unwrap_or(0),
            },
        })
    }

    /// Get the event record, if this is a recognised event
    pub fn record(&self) -> Option<EventRecord> {
        match self {
            Notification::Event(record) => Some(*record),
            Notification::Unknown { .. } => None,
        }
    }
}
