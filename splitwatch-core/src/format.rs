//! Elapsed time formatting
//!
//! Times render as `mm:ss.mmm`. There is no hour field; minutes keep
//! growing past 59.

use core::fmt::{self, Write};

use heapless::String;

/// Longest rendering of a `u64` millisecond value
pub const TIME_STRING_LEN: usize = 24;

/// Fixed-capacity buffer holding a formatted time
pub type TimeString = String<TIME_STRING_LEN>;

/// Millisecond value rendered as `mm:ss.mmm`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedTime(pub u64);

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_seconds = self.0 / 1000;
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        let millis = self.0 % 1000;
        write!(f, "{:02}:{:02}.{:03}", minutes, seconds, millis)
    }
}

/// Format milliseconds as `mm:ss.mmm`
pub fn format_time(ms: u64) -> TimeString {
    let mut out = TimeString::new();
    // Capacity covers u64::MAX
    let _ = write!(out, "{}", ElapsedTime(ms));
    out
}
