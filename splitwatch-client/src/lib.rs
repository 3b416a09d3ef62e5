//! Splitwatch client runtime
//!
//! Wires the transport-agnostic [`splitwatch_core::Stopwatch`] into an
//! async application:
//!
//! - [`channels`]: the inbox transports push notifications and link changes into
//! - [`session`]: shared context, event handling, and gated command sends
//! - [`tasks`]: the dispatch and display refresh loops
//! - [`display`]: snapshot sinks on top of `splitwatch-display`
//! - [`config`]: TOML configuration loading
//! - `time`: embassy-time clock and frame ticker (feature `time`)
//!
//! # Architecture
//!
//! ```text
//! transport --Inbound--> Inbox --> run_dispatch --> Session (Stopwatch)
//!                                                      |       ^
//!                        FrameSource --> run_refresh --+       | send()
//!                                             |                |
//!                                        DisplaySink       UI commands
//! ```
//!
//! Everything shares one `&Session`. The stopwatch lives in a blocking mutex
//! that is never held across an await.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to the other modules
#[macro_use]
mod fmt;

pub mod channels;
pub mod config;
pub mod display;
pub mod session;
pub mod tasks;
#[cfg(feature = "time")]
pub mod time;
pub mod transport;

pub use channels::{Inbound, Inbox, INBOX_CAPACITY};
pub use config::{load_config, parse_config};
pub use display::{DisplaySink, ScreenSink};
pub use session::Session;
pub use tasks::{dispatch_pending, refresh_once, run_dispatch, run_refresh, FrameSource};
#[cfg(feature = "time")]
pub use time::{EmbassyClock, TickerFrames};
pub use transport::{Transport, TransportError};
