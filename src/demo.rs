//! Animated demo graphs shared by the desktop simulator and the firmware.
//!
//! Horizontal modes show one labelled gauge per row; the vertical mode turns
//! every column into a bar, like a spectrum display.

use crate::display::{CharacterDisplay, GlyphStore};
use crate::graph::{GraphDisplay, GraphError, GraphMode};

/// Row labels of the horizontal gauges.
pub const LABELS: [&str; 4] = ["OIL", "H2O", "IAT", "BAT"];

/// Cells reserved for a label and its gap.
pub const LABEL_WIDTH: u8 = 4;

/// Sine wave mapped to 0.0..=1.0, using micromath.
pub fn wave(
    t: f32,
    speed: f32,
    phase: f32,
) -> f32 {
    0.5 + 0.5 * micromath::F32(t * speed + phase).sin().0
}

/// Clear the panel, load `mode` and print its static text.
pub fn start_mode<T>(
    graphs: &mut GraphDisplay<T>,
    mode: GraphMode,
) -> Result<GraphMode, GraphError>
where
    T: CharacterDisplay + GlyphStore,
{
    graphs.clear();
    let mode = graphs.init_graph(mode)?;
    if mode.is_horizontal() {
        for (row, label) in (0..graphs.rows()).zip(LABELS) {
            graphs.set_cursor(0, row);
            graphs.print(label);
        }
    }
    Ok(mode)
}

/// Draw every graph of the loaded mode at time `t`. Does nothing before
/// [`start_mode`].
pub fn draw_frame<T>(
    graphs: &mut GraphDisplay<T>,
    t: f32,
) where
    T: CharacterDisplay + GlyphStore,
{
    let Some(mode) = graphs.mode() else {
        return;
    };
    let rows = graphs.rows();
    let columns = graphs.columns();

    if mode.is_horizontal() {
        let length = columns.saturating_sub(LABEL_WIDTH);
        for row in 0..rows {
            let level = wave(t, 0.6 + 0.15 * f32::from(row), f32::from(row));
            graphs.draw_horizontal(row, LABEL_WIDTH, length, level);
        }
    } else {
        for column in 0..columns {
            let level = wave(t, 1.0, f32::from(column) * 0.35);
            graphs.draw_vertical(rows.saturating_sub(1), column, rows, level);
        }
    }
}
