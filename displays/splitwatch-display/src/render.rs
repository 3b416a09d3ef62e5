//! Stopwatch screen rendering
//!
//! Layout (8 rows of 21 characters):
//! ```text
//! 0  Connected
//! 1  01:01.234
//! 2
//! 3  1. LAP 1: 00:10.000
//! 4  2. LAP 2: 00:20.000
//! 5  3. GOAL: 00:30.000     <- highlighted
//! ```
//! Only the most recent laps are shown, oldest first.

use core::fmt::Write;

use heapless::String;
use splitwatch_core::config::DisplayConfig;
use splitwatch_core::{format_time, ElapsedTime, LapLabel, LapRecord, Snapshot};

use crate::screen::{Highlight, Screen, LINE_LEN, SCREEN_ROWS};

const STATUS_ROW: usize = 0;
const TIME_ROW: usize = 1;
const FIRST_LAP_ROW: usize = 3;

/// Most laps that fit below the time
pub const MAX_VISIBLE_LAPS: usize = SCREEN_ROWS - FIRST_LAP_ROW;

/// Room for a `u32` sequence, the longest label and a `u64` time
const LAP_LINE_FULL_LEN: usize = 48;

/// Format one lap line as `<seq>. <label>: <mm:ss.mmm>`
///
/// Lines wider than the screen keep their first `LINE_LEN` characters.
pub fn lap_line(record: &LapRecord) -> String<LINE_LEN> {
    let mut full: String<LAP_LINE_FULL_LEN> = String::new();
    // Capacity covers u32::MAX and u64::MAX
    let _ = write!(
        full,
        "{}. {}: {}",
        record.sequence,
        record.label.as_str(),
        ElapsedTime(record.elapsed_ms)
    );

    // All ASCII, so any byte index is a char boundary
    let mut line = String::new();
    let _ = line.push_str(&full[..full.len().min(LINE_LEN)]);
    line
}

/// Builds screens from snapshots
pub struct Renderer {
    screen: Screen,
    config: DisplayConfig,
}

impl Renderer {
    /// Create a new renderer
    pub fn new(config: DisplayConfig) -> Self {
        Self {
            screen: Screen::new(),
            config,
        }
    }

    /// Get the current screen buffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Get the screen buffer for presenting
    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Render a snapshot into the screen buffer
    pub fn render(&mut self, snapshot: &Snapshot) {
        let status = if self.config.show_status {
            snapshot.connection.label()
        } else {
            ""
        };
        self.screen.write_row(STATUS_ROW, status);
        self.screen
            .write_row(TIME_ROW, &format_time(snapshot.elapsed_ms));

        let visible = (self.config.visible_laps as usize).clamp(1, MAX_VISIBLE_LAPS);
        let skip = snapshot.laps.len().saturating_sub(visible);

        let mut goal = None;
        let mut row = FIRST_LAP_ROW;
        for record in snapshot.laps.iter().skip(skip) {
            let line = lap_line(record);
            self.screen.write_row(row, &line);
            if record.label == LapLabel::Goal {
                goal = Some(Highlight {
                    row: row as u8,
                    start_col: 0,
                    end_col: line.len() as u8,
                });
            }
            row += 1;
        }
        for blank in row..SCREEN_ROWS {
            self.screen.write_row(blank, "");
        }
        self.screen.set_highlight(goal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitwatch_core::{ConnectionStatus, LapLog, RunState};

    fn snapshot(elapsed_ms: u64, laps: &[(LapLabel, u64)]) -> Snapshot {
        let mut log = LapLog::new();
        for (label, ms) in laps {
            log.append(*label, *ms).unwrap();
        }
        Snapshot {
            elapsed_ms,
            run_state: RunState::Running,
            laps: log,
            connection: ConnectionStatus::Connected,
        }
    }

    #[test]
    fn test_lap_line() {
        let record = LapRecord {
            sequence: 2,
            label: LapLabel::Lap2,
            elapsed_ms: 20_000,
        };
        assert_eq!(lap_line(&record).as_str(), "2. LAP 2: 00:20.000");
    }

    #[test]
    fn test_long_lap_line_keeps_leading_columns() {
        // 100 hours: "12. LAP 1: 6000:00.000" is one column too wide
        let record = LapRecord {
            sequence: 12,
            label: LapLabel::Lap1,
            elapsed_ms: 360_000_000,
        };
        assert_eq!(lap_line(&record).as_str(), "12. LAP 1: 6000:00.00");

        let record = LapRecord {
            sequence: u32::MAX,
            label: LapLabel::Goal,
            elapsed_ms: u64::MAX,
        };
        assert_eq!(lap_line(&record).as_str(), "4294967295. GOAL: 307");
    }

    #[test]
    fn test_huge_time_row_keeps_leading_columns() {
        let mut renderer = Renderer::new(DisplayConfig::default());
        renderer.render(&snapshot(u64::MAX, &[]));
        assert_eq!(renderer.screen().row(1), Some("307445734561825:51.61"));
    }

    #[test]
    fn test_render_basic_layout() {
        let mut renderer = Renderer::new(DisplayConfig::default());
        renderer.render(&snapshot(
            30_000,
            &[
                (LapLabel::Lap1, 10_000),
                (LapLabel::Lap2, 20_000),
                (LapLabel::Goal, 30_000),
            ],
        ));

        let screen = renderer.screen();
        assert_eq!(screen.row(0), Some("Connected"));
        assert_eq!(screen.row(1), Some("00:30.000"));
        assert_eq!(screen.row(3), Some("1. LAP 1: 00:10.000"));
        assert_eq!(screen.row(5), Some("3. GOAL: 00:30.000"));
        assert_eq!(
            screen.highlight(),
            Some(Highlight {
                row: 5,
                start_col: 0,
                end_col: 18
            })
        );
    }

    #[test]
    fn test_render_shows_most_recent_laps() {
        let config = DisplayConfig {
            visible_laps: 2,
            show_status: false,
        };
        let mut renderer = Renderer::new(config);
        renderer.render(&snapshot(
            0,
            &[
                (LapLabel::Lap1, 1_000),
                (LapLabel::Lap2, 2_000),
                (LapLabel::Lap1, 3_000),
            ],
        ));

        let screen = renderer.screen();
        assert_eq!(screen.row(0), Some(""));
        assert_eq!(screen.row(3), Some("2. LAP 2: 00:02.000"));
        assert_eq!(screen.row(4), Some("3. LAP 1: 00:03.000"));
        assert_eq!(screen.row(5), Some(""));
        assert_eq!(screen.highlight(), None);
    }

    #[test]
    fn test_render_after_reset_clears_laps() {
        let mut renderer = Renderer::new(DisplayConfig::default());
        renderer.render(&snapshot(5_000, &[(LapLabel::Goal, 5_000)]));
        renderer.render(&snapshot(0, &[]));

        let screen = renderer.screen();
        assert_eq!(screen.row(1), Some("00:00.000"));
        assert_eq!(screen.row(3), Some(""));
        assert_eq!(screen.highlight(), None);
    }

    #[test]
    fn test_render_same_snapshot_is_not_dirty() {
        let mut renderer = Renderer::new(DisplayConfig::default());
        let snap = snapshot(1_000, &[(LapLabel::Lap1, 900), (LapLabel::Goal, 1_000)]);
        renderer.render(&snap);
        renderer.screen_mut().mark_drawn();
        renderer.render(&snap);
        assert!(!renderer.screen().needs_redraw());
    }
}
