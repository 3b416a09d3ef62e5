//! Run state machine
//!
//! The run state is a function of the previous state and the last device
//! event. Side effects (anchoring, lap log, refresh) are applied by
//! [`crate::stopwatch::Stopwatch`].

pub mod machine;

pub use machine::RunState;
