//! Screen layout and colours of the simulated panel.
//!
//! The panel is drawn dot by dot: every character cell is a 5x8 grid of
//! `DOT_SIZE` squares separated by `DOT_GAP`, and cells are separated by
//! `CELL_GAP`, like the glass of a real module.

use embedded_graphics::pixelcolor::Rgb565;
use hd44780_i2c_graph::config::{CHAR_HEIGHT_DOTS, CHAR_WIDTH_DOTS};

// =============================================================================
// Screen
// =============================================================================

pub const SCREEN_WIDTH: u32 = 400;
pub const SCREEN_HEIGHT: u32 = 240;

/// Window scale factor.
pub const WINDOW_SCALE: u32 = 2;

// =============================================================================
// Panel
// =============================================================================

pub const DOT_SIZE: u32 = 2;
pub const DOT_GAP: u32 = 1;
pub const CELL_GAP: u32 = 3;

/// Dot pitch including the gap.
pub const DOT_PITCH: u32 = DOT_SIZE + DOT_GAP;

pub const CELL_WIDTH: u32 = CHAR_WIDTH_DOTS as u32 * DOT_PITCH + CELL_GAP;
pub const CELL_HEIGHT: u32 = CHAR_HEIGHT_DOTS as u32 * DOT_PITCH + CELL_GAP;

/// Top-left corner of the first cell.
pub const PANEL_X: i32 = 18;
pub const PANEL_Y: i32 = 14;

/// Bezel padding around the cell area.
pub const BEZEL: u32 = 8;

// =============================================================================
// Status area
// =============================================================================

pub const STATUS_X: i32 = 8;
pub const STATUS_Y: i32 = 150;
pub const STATUS_LINE_HEIGHT: i32 = 12;

/// Event log lines shown under the status line.
pub const LOG_LINES: usize = 4;

// =============================================================================
// Colours
// =============================================================================

pub const BACKGROUND: Rgb565 = Rgb565::new(2, 4, 2);
pub const BEZEL_COLOR: Rgb565 = Rgb565::new(4, 8, 12);

/// Glass with the backlight on.
pub const GLASS_LIT: Rgb565 = Rgb565::new(14, 48, 4);
pub const DOT_ON_LIT: Rgb565 = Rgb565::new(2, 10, 2);
pub const DOT_OFF_LIT: Rgb565 = Rgb565::new(12, 44, 4);

/// Glass with the backlight off.
pub const GLASS_DARK: Rgb565 = Rgb565::new(4, 12, 2);
pub const DOT_ON_DARK: Rgb565 = Rgb565::new(1, 4, 1);
pub const DOT_OFF_DARK: Rgb565 = Rgb565::new(4, 11, 2);

pub const TEXT_COLOR: Rgb565 = Rgb565::new(31, 63, 31);
pub const HIGHLIGHT_COLOR: Rgb565 = Rgb565::new(31, 63, 0);
pub const LOG_COLOR: Rgb565 = Rgb565::new(31, 40, 0);
pub const HINT_COLOR: Rgb565 = Rgb565::new(16, 32, 16);

const _: () = assert!(CELL_WIDTH * 20 + BEZEL * 2 < SCREEN_WIDTH);
const _: () = assert!(PANEL_Y + (CELL_HEIGHT * 4 + BEZEL) as i32 <= STATUS_Y);
