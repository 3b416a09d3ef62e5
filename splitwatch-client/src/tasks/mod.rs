//! Async tasks
//!
//! Plain `async fn`s generic over mutex, clock, and transport. Applications
//! wrap them in their executor's task attribute with concrete types.

pub mod dispatch;
pub mod refresh;

pub use dispatch::{dispatch_pending, run_dispatch};
pub use refresh::{refresh_once, run_refresh, FrameSource};
