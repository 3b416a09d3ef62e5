//! Display surfaces
//!
//! Anything that can show a few rows of fixed-width text: a terminal, a
//! character LCD, a GUI label grid.

use crate::screen::{Screen, SCREEN_COLS, SCREEN_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// The surface did not accept the update
    Communication,
    /// Row or column outside the surface
    InvalidCoordinates,
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DisplayError::Communication => f.write_str("display did not accept update"),
            DisplayError::InvalidCoordinates => f.write_str("position outside display"),
        }
    }
}

/// Text surface the stopwatch screen is drawn on
///
/// Coordinates are in character cells, origin top left.
pub trait DisplayBackend {
    /// Blank the whole surface
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Put `text` on `row` starting at `col`
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Invert `start_col..end_col` on `row`
    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError>;

    /// Make everything drawn since the last flush visible
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Size as (columns, rows)
    fn dimensions(&self) -> (u8, u8);
}

/// Draw a changed screen to a backend
///
/// Returns `Ok(false)` without touching the backend if nothing changed.
/// The screen is only marked drawn once the backend has flushed.
pub fn present<B: DisplayBackend + ?Sized>(
    screen: &mut Screen,
    backend: &mut B,
) -> Result<bool, DisplayError> {
    if !screen.needs_redraw() {
        return Ok(false);
    }

    let (cols, rows) = backend.dimensions();
    if (cols as usize) < SCREEN_COLS || (rows as usize) < SCREEN_ROWS {
        return Err(DisplayError::InvalidCoordinates);
    }

    backend.clear()?;
    for (row, text) in screen.rows().filter(|(_, text)| !text.is_empty()) {
        backend.draw_text(row, 0, text)?;
    }
    if let Some(h) = screen.highlight() {
        backend.invert_region(h.row, h.start_col, h.end_col)?;
    }
    backend.flush()?;

    screen.mark_drawn();
    Ok(true)
}
