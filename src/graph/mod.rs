//! Bar and line graphs drawn with programmable glyphs.
//!
//! - `glyphs`: fill-level glyph synthesis
//! - `state`: last drawn extent per row or column
//! - `renderer`: mode setup and incremental redraw against the display traits
//! - `display`: [`GraphDisplay`], a display that hands its glyph slots to graphs
//!
//! A graph occupies a run of cells (a segment). Its value is a count of lit
//! dots along the segment, so a 4-cell horizontal graph resolves 20 steps and a
//! 4-cell vertical graph 32 steps.
//!
//! # Usage
//!
//! ```ignore
//! let mut graphs = GraphDisplay::new(lcd);
//! graphs.init_graph(GraphMode::HorizontalBar)?;
//! graphs.draw_horizontal(1, 4, 12, GraphValue::Percent(63));
//! ```

mod display;
pub mod glyphs;
mod renderer;
pub mod state;

pub use self::display::GraphDisplay;
pub use self::renderer::{GraphRenderer, GraphSegment};
pub use self::state::{Extent, GraphState, GRAPH_STATE_CAPACITY};

use crate::config::{CHAR_HEIGHT_DOTS, CHAR_WIDTH_DOTS};
use self::glyphs::{BAR_PATTERN, HORIZONTAL_GLYPHS, LINE_PATTERN, VERTICAL_GLYPHS};

// =============================================================================
// Graph Mode
// =============================================================================

/// Which glyph set is loaded and which draw routine applies.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GraphMode {
    /// Columns filling from the bottom up.
    VerticalBar,
    /// Rows filling from the left.
    HorizontalBar,
    /// A single moving dot column along a row.
    HorizontalLine,
}

impl GraphMode {
    /// Every mode, in tag order.
    pub const ALL: [Self; 3] = [Self::VerticalBar, Self::HorizontalBar, Self::HorizontalLine];

    /// Numeric tag accepted by `TryFrom<u8>`.
    pub const fn tag(self) -> u8 {
        match self {
            Self::VerticalBar => 1,
            Self::HorizontalBar => 2,
            Self::HorizontalLine => 3,
        }
    }

    /// Horizontal modes are drawn with `draw_horizontal`, keyed by row.
    pub const fn is_horizontal(self) -> bool { !matches!(self, Self::VerticalBar) }

    /// Dot pattern fed to the glyph synthesizer.
    pub const fn fill_pattern(self) -> u8 {
        match self {
            Self::VerticalBar | Self::HorizontalBar => BAR_PATTERN,
            Self::HorizontalLine => LINE_PATTERN,
        }
    }

    /// Glyph slots the mode occupies, starting at slot 0.
    pub const fn glyph_count(self) -> usize {
        if self.is_horizontal() { HORIZONTAL_GLYPHS } else { VERTICAL_GLYPHS }
    }

    /// Dots per cell along the graph axis.
    pub const fn dots_per_cell(self) -> u8 {
        if self.is_horizontal() { CHAR_WIDTH_DOTS } else { CHAR_HEIGHT_DOTS }
    }

    /// Next mode, wrapping around.
    pub const fn next(self) -> Self {
        match self {
            Self::VerticalBar => Self::HorizontalBar,
            Self::HorizontalBar => Self::HorizontalLine,
            Self::HorizontalLine => Self::VerticalBar,
        }
    }

    /// Short name for captions and logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::VerticalBar => "V-BAR",
            Self::HorizontalBar => "H-BAR",
            Self::HorizontalLine => "H-LINE",
        }
    }
}

impl TryFrom<u8> for GraphMode {
    type Error = GraphError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(Self::VerticalBar),
            2 => Ok(Self::HorizontalBar),
            3 => Ok(Self::HorizontalLine),
            other => Err(GraphError::UnsupportedGraphMode(other)),
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Errors reported by graph setup. Drawing never fails.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GraphError {
    /// The mode tag is not one of the known graph modes.
    UnsupportedGraphMode(u8),
}

impl From<core::convert::Infallible> for GraphError {
    fn from(never: core::convert::Infallible) -> Self { match never {} }
}

impl core::fmt::Display for GraphError {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        match self {
            Self::UnsupportedGraphMode(tag) => write!(f, "unsupported graph mode {tag}"),
        }
    }
}

impl core::error::Error for GraphError {}

// =============================================================================
// Values
// =============================================================================

/// Graph value in one of three units.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GraphValue {
    /// Zero-based index of the last lit dot.
    Pixels(u8),
    /// 0..=100 of the segment.
    Percent(u8),
    /// 0.0..=1.0 of the segment.
    Ratio(f32),
}

impl GraphValue {
    /// Zero-based dot extent on a segment `span` dots long.
    ///
    /// Percentages and ratios round to the nearest dot count and subtract one,
    /// so zero still lights the first dot. The result may exceed the segment;
    /// the renderer clamps it.
    pub fn to_extent(
        self,
        span: u16,
    ) -> u16 {
        match self {
            Self::Pixels(dots) => u16::from(dots),
            Self::Percent(percent) => {
                let lit = (u32::from(percent) * u32::from(span) + 50) / 100;
                lit.saturating_sub(1).min(u32::from(u16::MAX)) as u16
            }
            Self::Ratio(ratio) => {
                let extent = micromath::F32(ratio * f32::from(span)).round().0 - 1.0;
                // Also catches NaN
                if extent > 0.0 { extent as u16 } else { 0 }
            }
        }
    }
}

impl From<u8> for GraphValue {
    fn from(dots: u8) -> Self { Self::Pixels(dots) }
}

impl From<f32> for GraphValue {
    fn from(ratio: f32) -> Self { Self::Ratio(ratio) }
}
