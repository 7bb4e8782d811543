//! Recording display for renderer tests.

use crate::display::{BLANK, CharacterDisplay, GlyphBitmap, GlyphStore};

/// One call made on the display.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Op {
    Cursor(u8, u8),
    Char(u8),
    Glyph(u8, GlyphBitmap),
    Clear,
}

/// Character grid that logs every call and applies it like a real panel:
/// writes advance the cursor one cell to the right.
pub struct RecordingDisplay {
    columns: u8,
    rows: u8,
    cells: Vec<Vec<u8>>,
    glyphs: [GlyphBitmap; 8],
    cursor: (u8, u8),
    ops: Vec<Op>,
}

impl RecordingDisplay {
    pub fn new(
        columns: u8,
        rows: u8,
    ) -> Self {
        Self {
            columns,
            rows,
            cells: vec![vec![BLANK; usize::from(columns)]; usize::from(rows)],
            glyphs: [[0; 8]; 8],
            cursor: (0, 0),
            ops: Vec::new(),
        }
    }

    /// Drain the call log.
    pub fn take_ops(&mut self) -> Vec<Op> { core::mem::take(&mut self.ops) }

    /// Codes of one row; blank cells read as `b' '`.
    pub fn row(
        &self,
        row: u8,
    ) -> Vec<u8> {
        self.cells[usize::from(row)].clone()
    }

    pub fn glyph(
        &self,
        slot: u8,
    ) -> GlyphBitmap {
        self.glyphs[usize::from(slot)]
    }
}

impl CharacterDisplay for RecordingDisplay {
    fn columns(&self) -> u8 { self.columns }

    fn rows(&self) -> u8 { self.rows }

    fn set_cursor(
        &mut self,
        column: u8,
        row: u8,
    ) {
        self.ops.push(Op::Cursor(column, row));
        self.cursor = (column, row);
    }

    fn write_char(
        &mut self,
        code: u8,
    ) {
        self.ops.push(Op::Char(code));
        let (column, row) = self.cursor;
        assert!(column < self.columns && row < self.rows, "write outside the panel at ({column}, {row})");
        self.cells[usize::from(row)][usize::from(column)] = code;
        self.cursor.0 += 1;
    }

    fn clear(&mut self) {
        self.ops.push(Op::Clear);
        for row in &mut self.cells {
            row.fill(BLANK);
        }
        self.cursor = (0, 0);
    }
}

impl GlyphStore for RecordingDisplay {
    fn write_glyph(
        &mut self,
        slot: u8,
        bitmap: &GlyphBitmap,
    ) {
        self.ops.push(Op::Glyph(slot, *bitmap));
        self.glyphs[usize::from(slot & 0x07)] = *bitmap;
    }
}
