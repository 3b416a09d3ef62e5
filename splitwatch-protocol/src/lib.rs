//! Splitwatch link protocol
//!
//! This crate defines what travels over the wireless link between the lap
//! timer device and a client. Both directions share one GATT characteristic:
//!
//! ```text
//!  device ──notify──▶ client   {"event": <code>, "time_ms": <device elapsed>}
//!  client ──write───▶ device   "start" | "stop" | "reset"
//! ```
//!
//! Connection setup, service discovery, and subscription belong to the
//! transport. This crate only turns payload bytes into typed values and back.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod events;
pub mod notification;

pub use command::{Command, UnknownCommand};
pub use events::{EventRecord, RemoteEventKind};
pub use notification::{DecodeError, Notification, MAX_NOTIFICATION_LEN};

/// GATT service exposed by the timer
pub const SERVICE_UUID: &str = "1b24e5c4-a39c-4d46-92fb-3bbcb2f34a41";

/// Characteristic used for both notifications and command writes
pub const CHARACTERISTIC_UUID: &str = "9d18d524-2a6e-44ce-8724-445575b23e9a";
