//! Framebuffer display adapter.
//!
//! Keeps a 16×2 character grid and the four user glyphs in memory and
//! implements [`DisplayPort`] over it.  The firmware uses it as a console
//! mirror of the panel (changed rows are logged at `debug`); tests read the
//! grid back to check what was drawn.
//!
//! Glyph codes 0–3 are stored as-is; [`LogDisplay::row_text`] returns them
//! unchanged and the log line shows them as `#`.

use log::debug;

use crate::app::ports::DisplayPort;

pub const COLS: usize = 16;
pub const ROWS: usize = 2;
const GLYPH_SLOTS: usize = 4;

pub struct LogDisplay {
    cells: [[char; COLS]; ROWS],
    cursor: (usize, usize),
    glyphs: [Option<[u8; 8]>; GLYPH_SLOTS],
    clears: u32,
}

impl Default for LogDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl LogDisplay {
    pub fn new() -> Self {
        Self {
            cells: [[' '; COLS]; ROWS],
            cursor: (0, 0),
            glyphs: [None; GLYPH_SLOTS],
            clears: 0,
        }
    }

    /// Row contents, blank cells as spaces.
    pub fn row_text(&self, row: usize) -> String {
        self.cells.get(row).map(|r| r.iter().collect()).unwrap_or_default()
    }

    /// Bitmap loaded into glyph `slot`, if any.
    pub fn glyph(&self, slot: u8) -> Option<&[u8; 8]> {
        self.glyphs.get(usize::from(slot)).and_then(Option::as_ref)
    }

    /// Number of `clear()` calls so far.
    pub fn clears(&self) -> u32 {
        self.clears
    }

    fn log_row(&self, row: usize) {
        let printable: String = self.cells[row]
            .iter()
            .map(|c| if (*c as u32) < GLYPH_SLOTS as u32 { '#' } else { *c })
            .collect();
        debug!("LCD[{}] |{}|", row, printable);
    }
}

impl DisplayPort for LogDisplay {
    fn clear(&mut self) {
        self.cells = [[' '; COLS]; ROWS];
        self.cursor = (0, 0);
        self.clears = self.clears.wrapping_add(1);
    }

    fn move_cursor(&mut self, col: u8, row: u8) {
        self.cursor = (usize::from(col), usize::from(row));
    }

    /// Characters past the right edge are dropped.
    fn put_text(&mut self, text: &str) {
        let (mut col, row) = self.cursor;
        if row >= ROWS {
            return;
        }
        let before = self.cells[row];
        for ch in text.chars() {
            if col >= COLS {
                break;
            }
            self.cells[row][col] = ch;
            col += 1;
        }
        self.cursor = (col, row);
        if self.cells[row] != before {
            self.log_row(row);
        }
    }

    fn define_glyph(&mut self, slot: u8, bitmap: &[u8; 8]) {
        if let Some(entry) = self.glyphs.get_mut(usize::from(slot)) {
            *entry = Some(*bitmap);
        }
    }
}
