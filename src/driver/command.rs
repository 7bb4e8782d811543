//! HD44780 instruction set.
//!
//! Each instruction is identified by its highest set bit; the lower bits are
//! the flags listed under it.

// Instructions
pub const CLEAR_DISPLAY: u8 = 0x01;
pub const RETURN_HOME: u8 = 0x02;
pub const ENTRY_MODE_SET: u8 = 0x04;
pub const DISPLAY_CONTROL: u8 = 0x08;
pub const CURSOR_SHIFT: u8 = 0x10;
pub const FUNCTION_SET: u8 = 0x20;
pub const SET_CGRAM_ADDR: u8 = 0x40;
pub const SET_DDRAM_ADDR: u8 = 0x80;

// Entry mode flags
pub const ENTRY_LEFT: u8 = 0x02; // I/D: increment address
pub const ENTRY_SHIFT_INCREMENT: u8 = 0x01; // S: shift display on write

// Display control flags
pub const DISPLAY_ON: u8 = 0x04;
pub const CURSOR_ON: u8 = 0x02;
pub const BLINK_ON: u8 = 0x01;

// Cursor/display shift flags
pub const DISPLAY_MOVE: u8 = 0x08; // S/C: shift display instead of cursor
pub const MOVE_RIGHT: u8 = 0x04; // R/L

// Function set flags
pub const EIGHT_BIT_MODE: u8 = 0x10; // DL
pub const TWO_LINE: u8 = 0x08; // N
pub const FONT_5X10: u8 = 0x04; // F

/// Nibble sent three times to force 8-bit mode from any state.
pub const WAKE_UP: u8 = FUNCTION_SET | EIGHT_BIT_MODE;

/// Nibble that switches an 8-bit controller into 4-bit mode.
pub const FOUR_BIT_INTERFACE: u8 = FUNCTION_SET;

/// CGRAM address of the first row of a glyph slot.
#[inline]
pub const fn cgram_address(slot: u8) -> u8 { SET_CGRAM_ADDR | ((slot & 0x07) << 3) }

/// DDRAM address instruction for a raw address.
#[inline]
pub const fn ddram_address(address: u8) -> u8 { SET_DDRAM_ADDR | (address & 0x7F) }
