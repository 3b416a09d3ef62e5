//! Display abstraction and screen rendering for splitwatch
//!
//! This crate provides:
//! - `DisplayBackend` trait for different display surfaces (terminal, LCD, widget)
//! - `Screen`, a fixed-size text buffer with change tracking
//! - `Renderer`, which lays a stopwatch `Snapshot` out on a `Screen`
//!
//! # Architecture
//!
//! The client renders snapshots into a `Screen` and calls [`present`] to push
//! changed screens to whatever backend the application supplies. Backends only
//! need to draw text and invert a region; they never see stopwatch state.

#![cfg_attr(not(test), no_std)]

pub mod backend;
pub mod render;
pub mod screen;

// Re-export key types
pub use backend::{present, DisplayBackend, DisplayError};
pub use render::{lap_line, Renderer, MAX_VISIBLE_LAPS};
pub use screen::{Highlight, Screen, LINE_LEN, SCREEN_COLS, SCREEN_ROWS};
