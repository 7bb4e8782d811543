//! Logical model of a PCF8574 backpack wired to an HD44780 controller.
//!
//! [`VirtualLcd`] implements [`embedded_hal::i2c::I2c`], so the real driver can
//! be pointed at it. It decodes the expander port the way the controller sees
//! it: nibbles are latched on the falling edge of EN, the controller powers up
//! in 8-bit mode and switches to 4-bit on the `0x20` function set.
//!
//! Only the logical behavior is modeled (DDRAM, CGRAM, address counter, entry
//! mode, display shift, display control flags, backlight). Timing is not.
//!
//! # DDRAM layout
//!
//! In two-line mode each line holds 40 addresses: line 0 is `0x00..=0x27`,
//! line 1 is `0x40..=0x67`. Rows 2 and 3 of a 20x4 panel are the second half
//! of lines 0 and 1.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorType, I2c, Operation};
use heapless::String;

use crate::config::{LcdConfig, MAX_COLUMNS, ROW_OFFSETS};
use crate::display::{GLYPH_SLOTS, GlyphBitmap};
use crate::driver::command::*;
use crate::driver::expander::{BACKLIGHT, EN, RS, RW};

/// Addresses per line in two-line mode.
const LINE_LENGTH: u8 = 40;

/// Addresses in one-line mode.
const SINGLE_LINE_LENGTH: u8 = 80;

/// Start address of the second line.
const SECOND_LINE: u8 = 0x40;

const CGRAM_SIZE: usize = GLYPH_SLOTS as usize * 8;

/// Which memory the address counter points into.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Target {
    Ddram,
    Cgram,
}

/// [`DelayNs`] that returns immediately. Timing is irrelevant to the model.
#[derive(Clone, Copy, Default, Debug)]
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(
        &mut self,
        _ns: u32,
    ) {
    }
}

/// Expander + controller pair at one bus address.
pub struct VirtualLcd {
    config: LcdConfig,

    // Expander port
    port: u8,
    bytes_received: u32,

    // Interface
    four_bit: bool,
    pending_nibble: Option<u8>,

    // Memories
    ddram: [u8; 0x80],
    cgram: [u8; CGRAM_SIZE],
    target: Target,
    ddram_address: u8,
    cgram_address: u8,

    // Registers
    two_line: bool,
    increment: bool,
    shift_on_write: bool,
    display_on: bool,
    cursor_visible: bool,
    blinking: bool,
    display_shift: i8,
}

impl VirtualLcd {
    /// Power-on state: 8-bit interface, display off, DDRAM blank.
    pub const fn new(config: LcdConfig) -> Self {
        Self {
            config: config.clamped(),
            port: 0,
            bytes_received: 0,
            four_bit: false,
            pending_nibble: None,
            ddram: [b' '; 0x80],
            cgram: [0; CGRAM_SIZE],
            target: Target::Ddram,
            ddram_address: 0,
            cgram_address: 0,
            two_line: false,
            increment: true,
            shift_on_write: false,
            display_on: false,
            cursor_visible: false,
            blinking: false,
            display_shift: 0,
        }
    }

    /// Geometry and address this model answers to.
    pub const fn config(&self) -> LcdConfig { self.config }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Character code visible at a cell, honoring the display shift.
    /// Coordinates past the panel are clamped to its last row and column.
    pub fn cell(
        &self,
        column: u8,
        row: u8,
    ) -> u8 {
        let row = row.min(self.config.rows.saturating_sub(1));
        let column = column.min(self.config.columns.saturating_sub(1));
        let address = if self.two_line {
            let line_start = ROW_OFFSETS[row as usize] & SECOND_LINE;
            let offset = (ROW_OFFSETS[row as usize] & !SECOND_LINE) + column;
            let shifted = (i16::from(offset) + i16::from(self.display_shift)).rem_euclid(i16::from(LINE_LENGTH));
            line_start + shifted as u8
        } else {
            let offset = ROW_OFFSETS[row as usize] + column;
            (i16::from(offset) + i16::from(self.display_shift)).rem_euclid(i16::from(SINGLE_LINE_LENGTH)) as u8
        };
        self.ddram[address as usize]
    }

    /// One visible row as text. Glyph codes 0..=7 appear as control characters.
    pub fn row_text(
        &self,
        row: u8,
    ) -> String<{ MAX_COLUMNS as usize }> {
        let mut text = String::new();
        for column in 0..self.config.columns {
            text.push(char::from(self.cell(column, row))).ok();
        }
        text
    }

    /// Bitmap currently programmed into a glyph slot.
    pub fn glyph(
        &self,
        slot: u8,
    ) -> GlyphBitmap {
        let start = usize::from(slot & 0x07) * 8;
        let mut bitmap = [0; 8];
        for (dst, src) in bitmap.iter_mut().zip(&self.cgram[start..start + 8]) {
            *dst = src & 0x1F;
        }
        bitmap
    }

    /// Current DDRAM address counter.
    pub const fn address_counter(&self) -> u8 { self.ddram_address }

    /// Display shift in cells; positive after scrolling left.
    pub const fn display_shift(&self) -> i8 { self.display_shift }

    pub const fn is_four_bit(&self) -> bool { self.four_bit }

    pub const fn is_two_line(&self) -> bool { self.two_line }

    pub const fn is_display_on(&self) -> bool { self.display_on }

    pub const fn is_cursor_visible(&self) -> bool { self.cursor_visible }

    pub const fn is_blinking(&self) -> bool { self.blinking }

    /// Backlight bit of the last port write.
    pub const fn backlight(&self) -> bool { self.port & BACKLIGHT != 0 }

    /// Port writes addressed to this model since creation or the last reset.
    pub const fn bytes_received(&self) -> u32 { self.bytes_received }

    /// Zero the port write counter.
    pub fn reset_counter(&mut self) { self.bytes_received = 0; }

    // =========================================================================
    // Port decoding
    // =========================================================================

    fn port_write(
        &mut self,
        byte: u8,
    ) {
        self.bytes_received = self.bytes_received.wrapping_add(1);
        let falling_edge = self.port & EN != 0 && byte & EN == 0;
        self.port = byte;
        if falling_edge && byte & RW == 0 {
            self.latch(byte & 0xF0, byte & RS != 0);
        }
    }

    fn latch(
        &mut self,
        nibble: u8,
        data: bool,
    ) {
        if !self.four_bit {
            // D0..D3 are not wired, so they read as zero in 8-bit mode
            self.execute(nibble, data);
            return;
        }
        match self.pending_nibble.take() {
            None => self.pending_nibble = Some(nibble),
            Some(high) => self.execute(high | (nibble >> 4), data),
        }
    }

    fn execute(
        &mut self,
        value: u8,
        data: bool,
    ) {
        if data {
            self.write_data(value);
        } else if value & SET_DDRAM_ADDR != 0 {
            self.target = Target::Ddram;
            self.ddram_address = value & 0x7F;
        } else if value & SET_CGRAM_ADDR != 0 {
            self.target = Target::Cgram;
            self.cgram_address = value & 0x3F;
        } else if value & FUNCTION_SET != 0 {
            self.four_bit = value & EIGHT_BIT_MODE == 0;
            self.two_line = value & TWO_LINE != 0;
            self.pending_nibble = None;
        } else if value & CURSOR_SHIFT != 0 {
            let right = value & MOVE_RIGHT != 0;
            if value & DISPLAY_MOVE != 0 {
                self.shift_display(!right);
            } else {
                self.ddram_address = self.step_ddram(right);
            }
        } else if value & DISPLAY_CONTROL != 0 {
            self.display_on = value & DISPLAY_ON != 0;
            self.cursor_visible = value & CURSOR_ON != 0;
            self.blinking = value & BLINK_ON != 0;
        } else if value & ENTRY_MODE_SET != 0 {
            self.increment = value & ENTRY_LEFT != 0;
            self.shift_on_write = value & ENTRY_SHIFT_INCREMENT != 0;
        } else if value & RETURN_HOME != 0 {
            self.target = Target::Ddram;
            self.ddram_address = 0;
            self.display_shift = 0;
        } else if value & CLEAR_DISPLAY != 0 {
            self.ddram = [b' '; 0x80];
            self.target = Target::Ddram;
            self.ddram_address = 0;
            self.display_shift = 0;
            self.increment = true;
        }
    }

    fn write_data(
        &mut self,
        value: u8,
    ) {
        match self.target {
            Target::Cgram => {
                self.cgram[usize::from(self.cgram_address)] = value;
                self.cgram_address = if self.increment {
                    (self.cgram_address + 1) & 0x3F
                } else {
                    self.cgram_address.wrapping_sub(1) & 0x3F
                };
            }
            Target::Ddram => {
                self.ddram[usize::from(self.ddram_address)] = value;
                self.ddram_address = self.step_ddram(self.increment);
                if self.shift_on_write {
                    // Display follows the cursor: incrementing shifts left
                    self.shift_display(self.increment);
                }
            }
        }
    }

    fn step_ddram(
        &self,
        forward: bool,
    ) -> u8 {
        let address = self.ddram_address;
        if self.two_line {
            let line_start = address & SECOND_LINE;
            let offset = address & !SECOND_LINE;
            let offset = if forward {
                (offset + 1) % LINE_LENGTH
            } else {
                (offset + LINE_LENGTH - 1) % LINE_LENGTH
            };
            // Wrapping off the end of one line continues on the other
            let crossed = (forward && offset == 0) || (!forward && offset == LINE_LENGTH - 1);
            let line_start = if crossed { line_start ^ SECOND_LINE } else { line_start };
            line_start | offset
        } else if forward {
            (address + 1) % SINGLE_LINE_LENGTH
        } else {
            (address + SINGLE_LINE_LENGTH - 1) % SINGLE_LINE_LENGTH
        }
    }

    fn shift_display(
        &mut self,
        left: bool,
    ) {
        let span = i16::from(if self.two_line { LINE_LENGTH } else { SINGLE_LINE_LENGTH });
        let step = if left { 1 } else { -1 };
        let shift = (i16::from(self.display_shift) + step + span / 2).rem_euclid(span) - span / 2;
        self.display_shift = shift as i8;
    }
}

impl ErrorType for VirtualLcd {
    type Error = core::convert::Infallible;
}

impl I2c for VirtualLcd {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        // Another device on the bus
        if address != self.config.address {
            return Ok(());
        }
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    for &byte in bytes.iter() {
                        self.port_write(byte);
                    }
                }
                Operation::Read(buffer) => buffer.fill(self.port),
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
