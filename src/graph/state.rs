//! Last drawn extent per graph axis.
//!
//! Horizontal graphs key the table by row and remember the last cell column
//! they touched; vertical graphs key it by column and remember the top row.
//! The renderer compares the new extent against this record to blank only
//! the cells the previous draw left behind.

/// One entry per possible row or column coordinate.
///
/// Any [`CharacterDisplay`](crate::display::CharacterDisplay) can be graphed,
/// including 40-column modules the I2C driver does not drive itself, so the
/// table covers the whole `u8` range instead of the driver's panel limits.
pub const GRAPH_STATE_CAPACITY: usize = u8::MAX as usize + 1;

/// Recorded extent boundary of one axis.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Extent {
    /// Nothing drawn on this axis since the mode was initialized.
    #[default]
    Undrawn,
    /// Cell coordinate of the last drawn boundary.
    Cell(u8),
}

/// Fixed table of [`Extent`]s indexed by row or column.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GraphState {
    entries: [Extent; GRAPH_STATE_CAPACITY],
}

impl GraphState {
    /// All axes undrawn.
    pub const fn new() -> Self {
        Self {
            entries: [Extent::Undrawn; GRAPH_STATE_CAPACITY],
        }
    }

    /// Forget everything drawn so far.
    pub fn reset(&mut self) { self.entries = [Extent::Undrawn; GRAPH_STATE_CAPACITY]; }

    /// Recorded extent of `axis`.
    pub const fn get(
        &self,
        axis: u8,
    ) -> Extent {
        self.entries[axis as usize]
    }

    /// True when no axis holds a drawn extent.
    pub fn is_clear(&self) -> bool { self.entries.iter().all(|e| *e == Extent::Undrawn) }

    /// Recorded boundary of `axis` forced into `first..=last`, or `default`
    /// when nothing has been drawn yet.
    ///
    /// Clamping keeps a record left by a different segment on the same axis
    /// from blanking cells outside the segment being drawn.
    pub fn boundary(
        &self,
        axis: u8,
        first: u8,
        last: u8,
        default: u8,
    ) -> u8 {
        match self.get(axis) {
            Extent::Undrawn => default,
            Extent::Cell(cell) => cell.clamp(first, last),
        }
    }

    /// Record the boundary drawn on `axis`.
    pub(crate) fn record(
        &mut self,
        axis: u8,
        cell: u8,
    ) {
        self.entries[usize::from(axis)] = Extent::Cell(cell);
    }
}

impl Default for GraphState {
    fn default() -> Self { Self::new() }
}
