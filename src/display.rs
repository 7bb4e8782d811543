//! Traits the graph renderer draws through.
//!
//! - [`CharacterDisplay`]: cursor positioning and character output
//! - [`GlyphStore`]: programming the eight CGRAM glyph slots
//! - [`DisplayControl`]: on/off style toggles
//!
//! [`LcdI2c`](crate::driver::LcdI2c) implements all three. The renderer only
//! needs the first two, which keeps it testable against a recording mock.

use crate::config::CHAR_HEIGHT_DOTS;

/// One programmable character: 8 pixel rows, top to bottom, low 5 bits used.
pub type GlyphBitmap = [u8; CHAR_HEIGHT_DOTS as usize];

/// Number of programmable glyph slots in CGRAM.
pub const GLYPH_SLOTS: u8 = 8;

/// Character code written to erase a cell.
pub const BLANK: u8 = b' ';

/// Cursor addressing and character output.
///
/// Writes are fire-and-forget: the transport has no way to report failure.
pub trait CharacterDisplay {
    /// Characters per row.
    fn columns(&self) -> u8;

    /// Number of rows.
    fn rows(&self) -> u8;

    /// Move the cursor to a cell. Coordinates are zero-based.
    fn set_cursor(
        &mut self,
        column: u8,
        row: u8,
    );

    /// Write one character code at the cursor and advance it by one cell.
    fn write_char(
        &mut self,
        code: u8,
    );

    /// Blank the whole display and home the cursor.
    fn clear(&mut self);

    /// Write the bytes of `text` starting at the cursor.
    fn print(
        &mut self,
        text: &str,
    ) {
        for byte in text.bytes() {
            self.write_char(byte);
        }
    }

    /// Blank `count` cells of `row` starting at `column`, then put the cursor
    /// back at the segment start.
    ///
    /// All arguments are clamped to the display.
    fn clear_segment(
        &mut self,
        row: u8,
        column: u8,
        count: u8,
    ) {
        let row = row.min(self.rows().saturating_sub(1));
        let column = column.min(self.columns().saturating_sub(1));
        let count = count.min(self.columns() - column);

        self.set_cursor(column, row);
        for _ in 0..count {
            self.write_char(BLANK);
        }
        self.set_cursor(column, row);
    }
}

/// Programs glyph slots in the controller's character generator memory.
pub trait GlyphStore {
    /// Overwrite `slot` (0..=7) with `bitmap`.
    fn write_glyph(
        &mut self,
        slot: u8,
        bitmap: &GlyphBitmap,
    );
}

/// Display-wide toggles that do not touch character memory.
pub trait DisplayControl {
    /// Show or hide the display contents (DDRAM is kept).
    fn set_display_on(
        &mut self,
        on: bool,
    );

    /// Show or hide the underline cursor.
    fn set_cursor_visible(
        &mut self,
        visible: bool,
    );

    /// Enable or disable the blinking block cursor.
    fn set_blink(
        &mut self,
        blink: bool,
    );

    /// Switch the backlight.
    fn set_backlight(
        &mut self,
        on: bool,
    );
}
