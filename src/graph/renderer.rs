//! Graph setup and incremental redraw.
//!
//! The renderer never reads the display back. It relies on [`GraphState`] to
//! know how far the previous draw on a row (horizontal) or column (vertical)
//! reached, and only blanks the cells between the old and the new end.

use super::glyphs::{FULL_COLUMN_GLYPH, FULL_ROW_GLYPH, synthesize_horizontal, synthesize_vertical};
use super::state::GraphState;
use super::{GraphError, GraphMode, GraphValue};
use crate::config::{CHAR_HEIGHT_DOTS, CHAR_WIDTH_DOTS};
use crate::display::{BLANK, CharacterDisplay, GlyphBitmap, GlyphStore};

// =============================================================================
// Segment
// =============================================================================

/// Cells reserved for one graph, clamped to the display.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GraphSegment {
    /// Row of a horizontal segment, bottom row of a vertical one.
    pub row: u8,
    /// First column of a horizontal segment, column of a vertical one.
    pub column: u8,
    /// Cells in the segment, at least one.
    pub length: u8,
}

impl GraphSegment {
    /// Segment running right from `column`, cut at the right edge.
    pub fn horizontal<D: CharacterDisplay + ?Sized>(
        display: &D,
        row: u8,
        column: u8,
        length: u8,
    ) -> Self {
        let row = row.min(display.rows().saturating_sub(1));
        let column = column.min(display.columns().saturating_sub(1));
        let length = length.min(display.columns().saturating_sub(column)).max(1);
        Self { row, column, length }
    }

    /// Segment running up from `row`, cut at the top edge.
    pub fn vertical<D: CharacterDisplay + ?Sized>(
        display: &D,
        row: u8,
        column: u8,
        length: u8,
    ) -> Self {
        let row = row.min(display.rows().saturating_sub(1));
        let column = column.min(display.columns().saturating_sub(1));
        let length = length.min(row + 1).max(1);
        Self { row, column, length }
    }

    /// Rightmost cell of a horizontal segment.
    pub const fn last_column(&self) -> u8 { self.column + self.length - 1 }

    /// Topmost cell of a vertical segment.
    pub const fn top_row(&self) -> u8 { self.row + 1 - self.length }

    /// Split `value` into full cells and the glyph of the last cell, with the
    /// extent clamped to the segment.
    fn split(
        &self,
        value: GraphValue,
        dots: u8,
    ) -> (u8, u8) {
        let span = u16::from(self.length) * u16::from(dots);
        let extent = value.to_extent(span).min(span - 1);
        let dots = u16::from(dots);
        ((extent / dots) as u8, (extent % dots) as u8)
    }
}

// =============================================================================
// Renderer
// =============================================================================

/// Active graph mode plus the last drawn extents.
#[derive(Clone, Debug, Default)]
pub struct GraphRenderer {
    mode: Option<GraphMode>,
    state: GraphState,
}

impl GraphRenderer {
    /// No mode loaded: draws are ignored until [`init`](Self::init).
    pub const fn new() -> Self {
        Self {
            mode: None,
            state: GraphState::new(),
        }
    }

    /// Mode loaded by the last successful [`init`](Self::init).
    pub const fn mode(&self) -> Option<GraphMode> { self.mode }

    /// Extents recorded so far.
    pub const fn state(&self) -> &GraphState { &self.state }

    /// Load the glyphs of `mode` and forget all drawn extents.
    ///
    /// Accepts a [`GraphMode`] or its numeric tag. An unknown tag fails with
    /// [`GraphError::UnsupportedGraphMode`] before anything is written.
    ///
    /// Overwrites glyph slots 0..=4 (horizontal modes) or 0..=7 (vertical),
    /// including any custom characters stored there. Nothing already on the
    /// display is redrawn.
    pub fn init<S, M>(
        &mut self,
        store: &mut S,
        mode: M,
    ) -> Result<GraphMode, GraphError>
    where
        S: GlyphStore + ?Sized,
        M: TryInto<GraphMode>,
        GraphError: From<M::Error>,
    {
        let mode = match mode.try_into() {
            Ok(mode) => mode,
            Err(err) => {
                let err = GraphError::from(err);
                log_warn!("graph: {}", err);
                return Err(err);
            }
        };

        self.state.reset();
        let pattern = mode.fill_pattern();
        if mode.is_horizontal() {
            load_glyphs(store, &synthesize_horizontal(pattern));
        } else {
            load_glyphs(store, &synthesize_vertical(pattern));
        }
        self.mode = Some(mode);

        log_debug!("graph: {} in {} glyph slots", mode.label(), mode.glyph_count());
        Ok(mode)
    }

    /// Draw a horizontal graph on `row` from `column`, `length` cells long.
    ///
    /// Geometry is clamped to the display and the value to the segment.
    /// Ignored unless a horizontal mode is loaded.
    pub fn draw_horizontal<D: CharacterDisplay + ?Sized>(
        &mut self,
        display: &mut D,
        row: u8,
        column: u8,
        length: u8,
        value: impl Into<GraphValue>,
    ) {
        if !self.mode.is_some_and(GraphMode::is_horizontal) {
            return;
        }

        let segment = GraphSegment::horizontal(display, row, column, length);
        let (full, partial) = segment.split(value.into(), CHAR_WIDTH_DOTS);
        match self.mode {
            Some(GraphMode::HorizontalBar) => self.horizontal_bar(display, segment, full, partial),
            Some(GraphMode::HorizontalLine) => self.horizontal_line(display, segment, full, partial),
            _ => {}
        }
    }

    /// Draw a vertical bar in `column` rising from `row`, `length` cells tall.
    ///
    /// Geometry is clamped to the display and the value to the segment.
    /// Ignored unless [`GraphMode::VerticalBar`] is loaded.
    pub fn draw_vertical<D: CharacterDisplay + ?Sized>(
        &mut self,
        display: &mut D,
        row: u8,
        column: u8,
        length: u8,
        value: impl Into<GraphValue>,
    ) {
        if self.mode != Some(GraphMode::VerticalBar) {
            return;
        }

        let segment = GraphSegment::vertical(display, row, column, length);
        let (full, partial) = segment.split(value.into(), CHAR_HEIGHT_DOTS);
        self.vertical_bar(display, segment, full, partial);
    }

    // =========================================================================
    // Draw routines
    // =========================================================================

    fn horizontal_bar<D: CharacterDisplay + ?Sized>(
        &mut self,
        display: &mut D,
        segment: GraphSegment,
        full: u8,
        partial: u8,
    ) {
        let last = segment.last_column();
        let previous = self.state.boundary(segment.row, segment.column, last, last);
        let end = segment.column + full;

        display.set_cursor(segment.column, segment.row);
        for _ in 0..full {
            display.write_char(FULL_COLUMN_GLYPH);
        }
        display.write_char(partial);
        // Cursor already sits after the new end
        for _ in end..previous {
            display.write_char(BLANK);
        }

        self.state.record(segment.row, end);
    }

    fn horizontal_line<D: CharacterDisplay + ?Sized>(
        &mut self,
        display: &mut D,
        segment: GraphSegment,
        full: u8,
        partial: u8,
    ) {
        let last = segment.last_column();
        let previous = self.state.boundary(segment.row, segment.column, last, last);
        let position = segment.column + full;

        if previous != position {
            display.set_cursor(previous, segment.row);
            display.write_char(BLANK);
        }
        display.set_cursor(position, segment.row);
        display.write_char(partial);

        self.state.record(segment.row, position);
    }

    fn vertical_bar<D: CharacterDisplay + ?Sized>(
        &mut self,
        display: &mut D,
        segment: GraphSegment,
        full: u8,
        partial: u8,
    ) {
        let previous = self.state.boundary(segment.column, segment.top_row(), segment.row, segment.row);
        let top = segment.row - full;

        // Writes advance right, so every cell going up needs its own cursor
        for row in (top + 1..=segment.row).rev() {
            display.set_cursor(segment.column, row);
            display.write_char(FULL_ROW_GLYPH);
        }
        display.set_cursor(segment.column, top);
        display.write_char(partial);
        for row in previous..top {
            display.set_cursor(segment.column, row);
            display.write_char(BLANK);
        }

        self.state.record(segment.column, top);
    }
}

fn load_glyphs<S: GlyphStore + ?Sized>(
    store: &mut S,
    glyphs: &[GlyphBitmap],
) {
    for (slot, bitmap) in glyphs.iter().enumerate() {
        store.write_glyph(slot as u8, bitmap);
    }
}
