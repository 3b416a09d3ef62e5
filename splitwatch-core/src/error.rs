//! Error taxonomy
//!
//! None of these are fatal. Every path that produces one leaves the
//! stopwatch in a state it could already have reached.

use core::fmt;

/// Errors surfaced by the stopwatch core and the client runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClientError {
    /// A command was attempted without an active connection
    NotConnected,
    /// A notification could not be decoded into an event
    MalformedEvent,
    /// Connection dropped; the run was discarded
    ConnectionLost,
    /// The transport rejected a command write
    TransportWriteFailed,
    /// Lap log capacity reached; the mark was not recorded
    LapLogFull,
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ClientError::NotConnected => "not connected to timer",
            ClientError::MalformedEvent => "malformed notification",
            ClientError::ConnectionLost => "connection to timer lost",
            ClientError::TransportWriteFailed => "command write failed",
            ClientError::LapLogFull => "lap log full",
        };
        f.write_str(msg)
    }
}
