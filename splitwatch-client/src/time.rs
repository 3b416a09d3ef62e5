//! embassy-time adapters

use embassy_time::{Duration, Instant, Ticker};

use splitwatch_core::config::RefreshConfig;
use splitwatch_core::TimeSource;

use crate::tasks::FrameSource;

/// Monotonic milliseconds since the clock was created
pub struct EmbassyClock {
    origin: Instant,
}

impl EmbassyClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for EmbassyClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for EmbassyClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis()
    }
}

/// Fixed-rate display frames
pub struct TickerFrames {
    ticker: Ticker,
}

impl TickerFrames {
    pub fn new(config: &RefreshConfig) -> Self {
        Self {
            ticker: Ticker::every(Duration::from_millis(config.frame_interval_ms as u64)),
        }
    }
}

impl FrameSource for TickerFrames {
    async fn next_frame(&mut self) {
        self.ticker.next().await;
    }
}
