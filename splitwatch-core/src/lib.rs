//! Transport-agnostic core of the splitwatch client
//!
//! This crate contains all logic that does not depend on a specific radio
//! stack, executor, or screen:
//!
//! - Time source abstraction and device time synchronization
//! - Cancellable display refresh handle
//! - Run state machine
//! - Append-only lap log
//! - Stopwatch context applying events, link changes, and command gating
//! - Elapsed time formatting
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod connection;
pub mod error;
pub mod format;
pub mod laps;
pub mod state;
pub mod stopwatch;
pub mod time;

pub use connection::ConnectionStatus;
pub use error::ClientError;
pub use format::{format_time, ElapsedTime, TimeString};
pub use laps::{LapLabel, LapLog, LapRecord, MAX_LAPS};
pub use state::RunState;
pub use stopwatch::{Snapshot, Stopwatch};
pub use time::{Anchor, MockTime, RefreshTask, TimeSource, TimeSync};
