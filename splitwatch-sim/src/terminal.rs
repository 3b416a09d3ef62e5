//! Log-backed text display

use log::info;

use splitwatch_display::{DisplayBackend, DisplayError, SCREEN_COLS, SCREEN_ROWS};

/// Prints each flushed screen through `log`
pub struct TerminalBackend {
    lines: [String; SCREEN_ROWS],
    inverted: Option<(u8, u8, u8)>,
}

impl TerminalBackend {
    pub fn new() -> Self {
        Self {
            lines: Default::default(),
            inverted: None,
        }
    }

    fn frame(&self) -> Vec<String> {
        let border = format!("+{}+", "-".repeat(SCREEN_COLS));
        let mut out = vec![border.clone()];
        for (row, line) in self.lines.iter().enumerate() {
            let marker = match self.inverted {
                Some((r, _, _)) if r as usize == row => '>',
                _ => '|',
            };
            out.push(format!("{marker}{line:<width$}|", width = SCREEN_COLS));
        }
        out.push(border);
        out
    }
}

impl Default for TerminalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayBackend for TerminalBackend {
    fn clear(&mut self) -> Result<(), DisplayError> {
        for line in &mut self.lines {
            line.clear();
        }
        self.inverted = None;
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        let line = self
            .lines
            .get_mut(row as usize)
            .ok_or(DisplayError::InvalidCoordinates)?;
        if col as usize + text.chars().count() > SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }
        *line = format!("{:width$}{}", "", text, width = col as usize);
        Ok(())
    }

    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError> {
        if row as usize >= SCREEN_ROWS || start_col > end_col {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.inverted = Some((row, start_col, end_col));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        for line in self.frame() {
            info!("{}", line);
        }
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }
}
