//! Glyph synthesis for graphs.
//!
//! A character cell is 5 dots wide and 8 dots tall, so a horizontal graph needs
//! five glyphs (one per lit dot column) and a vertical graph needs eight (one
//! per lit dot row). The glyph index equals the fill level minus one, which
//! lets the renderer write `extent % dots` directly as a character code.

use crate::config::{CHAR_HEIGHT_DOTS, CHAR_WIDTH_DOTS};
use crate::display::GlyphBitmap;

/// Glyphs used by horizontal graphs (slots 0..=4).
pub const HORIZONTAL_GLYPHS: usize = CHAR_WIDTH_DOTS as usize;

/// Glyphs used by vertical graphs (slots 0..=7).
pub const VERTICAL_GLYPHS: usize = CHAR_HEIGHT_DOTS as usize;

/// All five dots of a row lit: accumulating bar.
pub const BAR_PATTERN: u8 = 0b11111;

/// Only the rightmost dot lit: shifting it left gives a moving pointer.
pub const LINE_PATTERN: u8 = 0b00001;

/// Slot of the fully filled horizontal glyph.
pub const FULL_COLUMN_GLYPH: u8 = HORIZONTAL_GLYPHS as u8 - 1;

/// Slot of the fully filled vertical glyph.
pub const FULL_ROW_GLYPH: u8 = VERTICAL_GLYPHS as u8 - 1;

const DOT_MASK: u8 = 0x1F;

/// Glyph `i` shows the left `i + 1` dot columns of `pattern`.
///
/// Every row repeats the same byte: the pattern is `pattern` shifted left by
/// `4 - i` and cut to five dots.
pub fn synthesize_horizontal(pattern: u8) -> [GlyphBitmap; HORIZONTAL_GLYPHS] {
    core::array::from_fn(|level| {
        let shift = (HORIZONTAL_GLYPHS - 1 - level) as u32;
        [pattern.wrapping_shl(shift) & DOT_MASK; VERTICAL_GLYPHS]
    })
}

/// Glyph `i` has its bottom `i + 1` rows set to `pattern`, the rest clear.
pub fn synthesize_vertical(pattern: u8) -> [GlyphBitmap; VERTICAL_GLYPHS] {
    core::array::from_fn(|level| {
        core::array::from_fn(|row| {
            if VERTICAL_GLYPHS - 1 - row <= level { pattern & DOT_MASK } else { 0 }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_shape_for_every_pattern() {
        for pattern in 0..=DOT_MASK {
            let glyphs = synthesize_horizontal(pattern);
            assert_eq!(glyphs.len(), 5);
            for (level, glyph) in glyphs.iter().enumerate() {
                let expected = (pattern << (4 - level)) & 0x1F;
                assert!(glyph.iter().all(|&row| row == expected), "pattern {pattern:#07b} level {level}");
            }
        }
    }

    #[test]
    fn test_horizontal_bar_fills_from_left() {
        let glyphs = synthesize_horizontal(BAR_PATTERN);
        let rows: Vec<u8> = glyphs.iter().map(|g| g[0]).collect();
        assert_eq!(rows, [0b10000, 0b11000, 0b11100, 0b11110, 0b11111]);
    }

    #[test]
    fn test_horizontal_line_marches_right() {
        let glyphs = synthesize_horizontal(LINE_PATTERN);
        let rows: Vec<u8> = glyphs.iter().map(|g| g[0]).collect();
        assert_eq!(rows, [0b10000, 0b01000, 0b00100, 0b00010, 0b00001]);
    }

    #[test]
    fn test_vertical_shape_for_every_pattern() {
        for pattern in 0..=DOT_MASK {
            let glyphs = synthesize_vertical(pattern);
            assert_eq!(glyphs.len(), 8);
            for (level, glyph) in glyphs.iter().enumerate() {
                let lit = glyph.iter().filter(|&&row| row != 0).count();
                if pattern != 0 {
                    assert_eq!(lit, level + 1);
                }
                // Lit rows sit at the bottom
                for (row, &bits) in glyph.iter().enumerate() {
                    let expected = if row >= 7 - level { pattern } else { 0 };
                    assert_eq!(bits, expected, "pattern {pattern:#07b} level {level} row {row}");
                }
            }
        }
    }

    #[test]
    fn test_vertical_full_glyph() {
        let glyphs = synthesize_vertical(BAR_PATTERN);
        assert_eq!(glyphs[usize::from(FULL_ROW_GLYPH)], [0x1F; 8]);
        assert_eq!(glyphs[0], [0, 0, 0, 0, 0, 0, 0, 0x1F]);
    }

    #[test]
    fn test_pattern_cut_to_five_dots() {
        let glyphs = synthesize_horizontal(0xFF);
        assert!(glyphs.iter().flatten().all(|&row| row <= 0x1F));
        let glyphs = synthesize_vertical(0xFF);
        assert_eq!(glyphs[7], [0x1F; 8]);
    }
}
