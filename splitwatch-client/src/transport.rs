//! Outbound transport abstraction
//!
//! The radio stack (scanning, GATT discovery, subscription) lives behind
//! this trait. The session only ever asks it to write a command payload;
//! everything the transport hears goes into the [`crate::channels::Inbox`].

use core::fmt;
use core::future::Future;

/// Errors from a transport write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// No link to write on
    Disconnected,
    /// The peer or the stack rejected the write
    Rejected,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Disconnected => f.write_str("link is down"),
            TransportError::Rejected => f.write_str("write rejected"),
        }
    }
}

/// Command write path to the timer
///
/// Takes `&self` so two commands may be in flight at once. Implementations
/// that cannot interleave writes must serialize internally.
pub trait Transport {
    /// Write one command payload to the timer's characteristic
    fn write(&self, payload: &[u8]) -> impl Future<Output = Result<(), TransportError>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn write(&self, payload: &[u8]) -> impl Future<Output = Result<(), TransportError>> {
        (**self).write(payload)
    }
}
