//! Text screen buffer
//!
//! Fixed grid of [`SCREEN_ROWS`] x [`SCREEN_COLS`] characters with at most
//! one inverted span. Writes that do not change anything leave the buffer
//! clean, so an idle stopwatch costs no redraws.

use heapless::String;

pub const SCREEN_ROWS: usize = 8;
pub const SCREEN_COLS: usize = 21;

/// Capacity of one row in bytes
pub const LINE_LEN: usize = SCREEN_COLS;

/// Inverted span on one row, `end_col` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Highlight {
    pub row: u8,
    pub start_col: u8,
    pub end_col: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Screen {
    text: [String<LINE_LEN>; SCREEN_ROWS],
    highlight: Option<Highlight>,
    /// Changed since last drawn
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Blank screen, due for its first draw
    pub fn new() -> Self {
        Self {
            text: core::array::from_fn(|_| String::new()),
            highlight: None,
            dirty: true,
        }
    }

    /// Replace a row's text, cut to the row width on a char boundary
    ///
    /// Rows past the bottom are ignored. Returns true if the row changed.
    pub fn write_row(&mut self, row: usize, text: &str) -> bool {
        let Some(slot) = self.text.get_mut(row) else {
            return false;
        };
        let mut end = text.len().min(LINE_LEN);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let text = &text[..end];
        if slot.as_str() == text {
            return false;
        }
        slot.clear();
        // Fits: `text` is at most LINE_LEN bytes
        let _ = slot.push_str(text);
        self.dirty = true;
        true
    }

    pub fn row(&self, row: usize) -> Option<&str> {
        self.text.get(row).map(String::as_str)
    }

    /// All rows top to bottom, with their index
    pub fn rows(&self) -> impl Iterator<Item = (u8, &str)> {
        self.text
            .iter()
            .enumerate()
            .map(|(i, line)| (i as u8, line.as_str()))
    }

    pub fn highlight(&self) -> Option<Highlight> {
        self.highlight
    }

    /// Replace the inverted span; `None` removes it
    pub fn set_highlight(&mut self, highlight: Option<Highlight>) {
        let highlight = highlight.filter(|h| (h.row as usize) < SCREEN_ROWS);
        if self.highlight != highlight {
            self.highlight = highlight;
            self.dirty = true;
        }
    }

    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// Call once the screen has reached the display
    pub fn mark_drawn(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_row_truncates() {
        let mut screen = Screen::new();
        assert!(screen.write_row(0, "0123456789012345678901234"));
        assert_eq!(screen.row(0).map(str::len), Some(LINE_LEN));
    }

    #[test]
    fn test_write_row_truncates_on_char_boundary() {
        let mut screen = Screen::new();
        // 20 ASCII bytes, then a 2-byte char straddling the limit
        screen.write_row(0, "01234567890123456789\u{e9}");
        assert_eq!(screen.row(0), Some("01234567890123456789"));
    }

    #[test]
    fn test_unchanged_row_stays_clean() {
        let mut screen = Screen::new();
        screen.write_row(2, "1. LAP 1: 00:01.000");
        screen.mark_drawn();
        assert!(!screen.write_row(2, "1. LAP 1: 00:01.000"));
        assert!(!screen.needs_redraw());
        assert!(screen.write_row(2, "1. LAP 2: 00:01.000"));
        assert!(screen.needs_redraw());
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut screen = Screen::new();
        screen.mark_drawn();
        assert!(!screen.write_row(SCREEN_ROWS, "nope"));
        screen.set_highlight(Some(Highlight {
            row: SCREEN_ROWS as u8,
            start_col: 0,
            end_col: 1,
        }));
        assert!(!screen.needs_redraw());
        assert_eq!(screen.row(SCREEN_ROWS), None);
        assert_eq!(screen.highlight(), None);
    }

    #[test]
    fn test_same_highlight_stays_clean() {
        let goal = Highlight {
            row: 5,
            start_col: 0,
            end_col: 18,
        };
        let mut screen = Screen::new();
        screen.set_highlight(Some(goal));
        screen.mark_drawn();
        screen.set_highlight(Some(goal));
        assert!(!screen.needs_redraw());
        screen.set_highlight(None);
        assert!(screen.needs_redraw());
        assert_eq!(screen.highlight(), None);
    }
}
