//! HD44780 driver over a PCF8574 I2C backpack.
//!
//! - `command`: instruction codes and flag bits
//! - `expander`: nibble framing and enable pulses on the expander port
//!
//! [`LcdI2c`] keeps shadow copies of the function, display-control and
//! entry-mode registers, so each toggle is a single instruction.
//!
//! # Usage
//!
//! ```ignore
//! let mut lcd = LcdI2c::new(i2c, delay, LcdConfig::lcd2004());
//! lcd.begin();
//! lcd.set_cursor(0, 1);
//! lcd.print("Oil 92C");
//! ```

pub mod command;
pub mod expander;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use self::command::*;
use self::expander::{Expander, Register};
use crate::config::{LcdConfig, ROW_OFFSETS};
use crate::display::{CharacterDisplay, DisplayControl, GlyphBitmap, GlyphStore};

/// Character LCD behind a PCF8574 backpack.
pub struct LcdI2c<I2C, D> {
    expander: Expander<I2C, D>,
    config: LcdConfig,
    display_function: u8,
    display_control: u8,
    display_mode: u8,
}

impl<I2C, D> LcdI2c<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create the driver. Nothing is sent until [`begin`](Self::begin).
    ///
    /// Geometry outside the supported range is clamped.
    pub fn new(
        i2c: I2C,
        delay: D,
        config: LcdConfig,
    ) -> Self {
        let config = config.clamped();
        Self {
            expander: Expander::new(i2c, delay, config.address),
            config,
            display_function: 0,
            display_control: 0,
            display_mode: 0,
        }
    }

    /// Run the power-on sequence and leave the display cleared, on, with the
    /// cursor hidden and text flowing left to right.
    ///
    /// Resetting the MCU does not reset the controller, so the sequence
    /// forces 8-bit mode first and only then switches to 4-bit.
    pub fn begin(&mut self) {
        log_debug!(
            "lcd: begin {}x{} at {=u8:#x}",
            self.config.columns,
            self.config.rows,
            self.config.address
        );

        self.display_function = if self.config.rows > 1 { TWO_LINE } else { 0 };

        // At least 40ms after power rises above 2.7V
        self.expander.delay_ms(50);

        // Pull RS and RW low, backlight off
        self.expander.write_port(0);
        self.expander.delay_ms(1000);

        // Datasheet figure 24: three tries at 8-bit mode, then 4-bit
        self.expander.write_nibble(WAKE_UP);
        self.expander.delay_us(4500);
        self.expander.write_nibble(WAKE_UP);
        self.expander.delay_us(4500);
        self.expander.write_nibble(WAKE_UP);
        self.expander.delay_us(150);
        self.expander.write_nibble(FOUR_BIT_INTERFACE);

        self.command(FUNCTION_SET | self.display_function);

        self.display_control = DISPLAY_ON;
        self.update_display_control();

        self.clear();

        self.display_mode = ENTRY_LEFT;
        self.update_entry_mode();

        self.home();

        self.expander.set_backlight(self.config.backlight);
    }

    /// Address and geometry this driver was created with.
    pub const fn config(&self) -> LcdConfig { self.config }

    /// Borrow the underlying bus.
    pub const fn i2c(&self) -> &I2C { self.expander.i2c() }

    /// Give back the bus and the delay.
    pub fn release(self) -> (I2C, D) { self.expander.release() }

    // =========================================================================
    // Cursor and memory
    // =========================================================================

    /// Blank the display and move the cursor home. Slow (~2ms).
    pub fn clear(&mut self) {
        self.command(CLEAR_DISPLAY);
        self.expander.delay_us(2000);
    }

    /// Move the cursor home and undo any display shift. Slow (~2ms).
    pub fn home(&mut self) {
        self.command(RETURN_HOME);
        self.expander.delay_us(2000);
    }

    /// Move the cursor to `column`, `row` (zero-based, row clamped).
    ///
    /// Also switches writes back to DDRAM after [`create_char`](Self::create_char).
    pub fn set_cursor(
        &mut self,
        column: u8,
        row: u8,
    ) {
        let row = row.min(self.config.rows.saturating_sub(1));
        self.command(ddram_address(column.wrapping_add(ROW_OFFSETS[row as usize])));
    }

    /// Blank `count` cells of `row` from `column` and return the cursor there.
    pub fn clear_segment(
        &mut self,
        row: u8,
        column: u8,
        count: u8,
    ) {
        CharacterDisplay::clear_segment(self, row, column, count);
    }

    /// Program glyph `slot` (masked to 0..=7) with `bitmap`.
    ///
    /// Leaves the controller addressing CGRAM: call
    /// [`set_cursor`](Self::set_cursor) before writing text again.
    pub fn create_char(
        &mut self,
        slot: u8,
        bitmap: &GlyphBitmap,
    ) {
        self.command(cgram_address(slot));
        for &row in bitmap {
            self.write_byte(row);
        }
    }

    /// Send a raw instruction byte built from the `command` constants.
    ///
    /// The shadow registers are not updated, so later toggles may undo it.
    #[inline]
    pub fn command(
        &mut self,
        value: u8,
    ) {
        self.expander.send(value, Register::Instruction);
    }

    /// Write one raw character code at the cursor.
    #[inline]
    pub fn write_byte(
        &mut self,
        code: u8,
    ) {
        self.expander.send(code, Register::Data);
    }

    /// Write the bytes of `text` at the cursor.
    pub fn print(
        &mut self,
        text: &str,
    ) {
        for byte in text.bytes() {
            self.write_byte(byte);
        }
    }

    // =========================================================================
    // Display control
    // =========================================================================

    /// Show the display contents.
    pub fn display_on(&mut self) { self.set_control_flag(DISPLAY_ON, true); }

    /// Hide the display contents without losing them.
    pub fn display_off(&mut self) { self.set_control_flag(DISPLAY_ON, false); }

    /// Show the underline cursor.
    pub fn cursor_on(&mut self) { self.set_control_flag(CURSOR_ON, true); }

    /// Hide the underline cursor.
    pub fn cursor_off(&mut self) { self.set_control_flag(CURSOR_ON, false); }

    /// Blink the cursor cell.
    pub fn blink_on(&mut self) { self.set_control_flag(BLINK_ON, true); }

    /// Stop blinking the cursor cell.
    pub fn blink_off(&mut self) { self.set_control_flag(BLINK_ON, false); }

    /// Shift the whole display one cell left without touching DDRAM.
    pub fn scroll_display_left(&mut self) { self.command(CURSOR_SHIFT | DISPLAY_MOVE); }

    /// Shift the whole display one cell right without touching DDRAM.
    pub fn scroll_display_right(&mut self) { self.command(CURSOR_SHIFT | DISPLAY_MOVE | MOVE_RIGHT); }

    /// Text flows left to right from the cursor.
    pub fn left_to_right(&mut self) { self.set_entry_flag(ENTRY_LEFT, true); }

    /// Text flows right to left from the cursor.
    pub fn right_to_left(&mut self) { self.set_entry_flag(ENTRY_LEFT, false); }

    /// Shift the display on every write ("right justify" from the cursor).
    pub fn autoscroll_on(&mut self) { self.set_entry_flag(ENTRY_SHIFT_INCREMENT, true); }

    /// Keep the display still on writes.
    pub fn autoscroll_off(&mut self) { self.set_entry_flag(ENTRY_SHIFT_INCREMENT, false); }

    /// Turn the backlight on.
    pub fn backlight_on(&mut self) { self.expander.set_backlight(true); }

    /// Turn the backlight off.
    pub fn backlight_off(&mut self) { self.expander.set_backlight(false); }

    /// Switch the backlight.
    pub fn set_backlight(
        &mut self,
        on: bool,
    ) {
        self.expander.set_backlight(on);
    }

    /// Current backlight state.
    pub const fn backlight(&self) -> bool { self.expander.backlight() }

    // =========================================================================
    // Internals
    // =========================================================================

    fn set_control_flag(
        &mut self,
        flag: u8,
        on: bool,
    ) {
        if on {
            self.display_control |= flag;
        } else {
            self.display_control &= !flag;
        }
        self.update_display_control();
    }

    fn set_entry_flag(
        &mut self,
        flag: u8,
        on: bool,
    ) {
        if on {
            self.display_mode |= flag;
        } else {
            self.display_mode &= !flag;
        }
        self.update_entry_mode();
    }

    fn update_display_control(&mut self) { self.command(DISPLAY_CONTROL | self.display_control); }

    fn update_entry_mode(&mut self) { self.command(ENTRY_MODE_SET | self.display_mode); }
}

// =============================================================================
// Trait implementations
// =============================================================================

impl<I2C, D> CharacterDisplay for LcdI2c<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn columns(&self) -> u8 { self.config.columns }

    fn rows(&self) -> u8 { self.config.rows }

    fn set_cursor(
        &mut self,
        column: u8,
        row: u8,
    ) {
        Self::set_cursor(self, column, row);
    }

    fn write_char(
        &mut self,
        code: u8,
    ) {
        self.write_byte(code);
    }

    fn clear(&mut self) { Self::clear(self); }
}

impl<I2C, D> GlyphStore for LcdI2c<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn write_glyph(
        &mut self,
        slot: u8,
        bitmap: &GlyphBitmap,
    ) {
        self.create_char(slot, bitmap);
    }
}

impl<I2C, D> DisplayControl for LcdI2c<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn set_display_on(
        &mut self,
        on: bool,
    ) {
        self.set_control_flag(DISPLAY_ON, on);
    }

    fn set_cursor_visible(
        &mut self,
        visible: bool,
    ) {
        self.set_control_flag(CURSOR_ON, visible);
    }

    fn set_blink(
        &mut self,
        blink: bool,
    ) {
        self.set_control_flag(BLINK_ON, blink);
    }

    fn set_backlight(
        &mut self,
        on: bool,
    ) {
        self.expander.set_backlight(on);
    }
}

impl<I2C, D> core::fmt::Write for LcdI2c<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn write_str(
        &mut self,
        s: &str,
    ) -> core::fmt::Result {
        self.print(s);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use core::fmt::Write;

    use super::*;
    use crate::virtual_lcd::{NoDelay, VirtualLcd};

    fn started(config: LcdConfig) -> LcdI2c<VirtualLcd, NoDelay> {
        let mut lcd = LcdI2c::new(VirtualLcd::new(config), NoDelay, config);
        lcd.begin();
        lcd
    }

    #[test]
    fn test_begin_state() {
        let lcd = started(LcdConfig::lcd2004());
        let vlcd = lcd.i2c();
        assert!(vlcd.is_four_bit());
        assert!(vlcd.is_two_line());
        assert!(vlcd.is_display_on());
        assert!(!vlcd.is_cursor_visible());
        assert!(!vlcd.is_blinking());
        assert!(vlcd.backlight());
        assert_eq!(vlcd.address_counter(), 0);
        for row in 0..4 {
            assert_eq!(vlcd.row_text(row).as_str(), "                    ");
        }
    }

    #[test]
    fn test_single_row_uses_one_line_mode() {
        let lcd = started(LcdConfig::new(0x27, 16, 1));
        assert!(!lcd.i2c().is_two_line());
    }

    #[test]
    fn test_backlight_config_respected() {
        let lcd = started(LcdConfig::lcd1602().with_backlight(false));
        assert!(!lcd.i2c().backlight());
        assert!(!lcd.backlight());
    }

    #[test]
    fn test_print_at_cursor_on_each_row() {
        let mut lcd = started(LcdConfig::lcd2004());
        lcd.set_cursor(3, 0);
        lcd.print("Oil");
        lcd.set_cursor(0, 1);
        lcd.print("DSG");
        lcd.set_cursor(17, 2);
        lcd.print("IAT");
        lcd.set_cursor(5, 3);
        lcd.print("EGT");

        let vlcd = lcd.i2c();
        assert_eq!(vlcd.row_text(0).as_str(), "   Oil              ");
        assert_eq!(vlcd.row_text(1).as_str(), "DSG                 ");
        assert_eq!(vlcd.row_text(2).as_str(), "                 IAT");
        assert_eq!(vlcd.row_text(3).as_str(), "     EGT            ");
    }

    #[test]
    fn test_set_cursor_clamps_row() {
        let mut lcd = started(LcdConfig::lcd1602());
        lcd.set_cursor(0, 7);
        lcd.print("x");
        assert_eq!(lcd.i2c().cell(0, 1), b'x');
    }

    #[test]
    fn test_struct_literal_config_is_clamped() {
        let config = LcdConfig {
            rows: 0,
            ..LcdConfig::lcd1602()
        };
        let mut lcd = started(config);
        assert_eq!(lcd.config().rows, 1);
        lcd.set_cursor(0, 0);
        lcd.print("a");
        assert_eq!(lcd.i2c().cell(0, 0), b'a');

        let config = LcdConfig {
            rows: 6,
            ..LcdConfig::lcd2004()
        };
        let mut lcd = started(config);
        assert_eq!(lcd.config().rows, 4);
        lcd.set_cursor(2, 5);
        lcd.print("b");
        assert_eq!(lcd.i2c().cell(2, 3), b'b');
    }

    #[test]
    fn test_raw_command() {
        let mut lcd = started(LcdConfig::lcd2004());
        lcd.command(CURSOR_SHIFT | MOVE_RIGHT);
        lcd.command(CURSOR_SHIFT | MOVE_RIGHT);
        lcd.print("c");
        assert_eq!(lcd.i2c().cell(2, 0), b'c');
    }

    #[test]
    fn test_fmt_write() {
        let mut lcd = started(LcdConfig::lcd1602());
        write!(lcd, "{}V", 14).ok();
        assert_eq!(lcd.i2c().row_text(0).as_str(), "14V             ");
    }

    #[test]
    fn test_clear() {
        let mut lcd = started(LcdConfig::lcd1602());
        lcd.print("hello");
        lcd.clear();
        assert_eq!(lcd.i2c().row_text(0).as_str(), "                ");
        assert_eq!(lcd.i2c().address_counter(), 0);
    }

    #[test]
    fn test_clear_segment() {
        let mut lcd = started(LcdConfig::lcd1602());
        lcd.set_cursor(0, 1);
        lcd.print("0123456789ABCDEF");
        lcd.clear_segment(1, 4, 3);
        assert_eq!(lcd.i2c().row_text(1).as_str(), "0123   789ABCDEF");
        // Cursor is back at the segment start
        lcd.print("x");
        assert_eq!(lcd.i2c().row_text(1).as_str(), "0123x  789ABCDEF");
    }

    #[test]
    fn test_clear_segment_clamps_count() {
        let mut lcd = started(LcdConfig::lcd1602());
        lcd.print("0123456789ABCDEF");
        lcd.clear_segment(0, 14, 10);
        assert_eq!(lcd.i2c().row_text(0).as_str(), "0123456789ABCD  ");
        // Nothing spilled into the next line
        assert_eq!(lcd.i2c().row_text(1).as_str(), "                ");
    }

    #[test]
    fn test_create_char() {
        let mut lcd = started(LcdConfig::lcd1602());
        let heart = [0b00000, 0b01010, 0b11111, 0b11111, 0b01110, 0b00100, 0b00000, 0b00000];
        lcd.create_char(3, &heart);
        assert_eq!(lcd.i2c().glyph(3), heart);

        lcd.set_cursor(2, 0);
        lcd.write_byte(3);
        assert_eq!(lcd.i2c().cell(2, 0), 3);
    }

    #[test]
    fn test_create_char_masks_slot() {
        let mut lcd = started(LcdConfig::lcd1602());
        lcd.create_char(10, &[0x1F; 8]);
        assert_eq!(lcd.i2c().glyph(2), [0x1F; 8]);
    }

    #[test]
    fn test_display_control_toggles() {
        let mut lcd = started(LcdConfig::lcd1602());
        lcd.cursor_on();
        lcd.blink_on();
        assert!(lcd.i2c().is_cursor_visible());
        assert!(lcd.i2c().is_blinking());

        lcd.display_off();
        assert!(!lcd.i2c().is_display_on());
        // Other flags survive
        assert!(lcd.i2c().is_cursor_visible());

        lcd.cursor_off();
        lcd.blink_off();
        lcd.display_on();
        assert!(lcd.i2c().is_display_on());
        assert!(!lcd.i2c().is_cursor_visible());
        assert!(!lcd.i2c().is_blinking());
    }

    #[test]
    fn test_display_control_trait() {
        let mut lcd = started(LcdConfig::lcd1602());
        DisplayControl::set_cursor_visible(&mut lcd, true);
        DisplayControl::set_backlight(&mut lcd, false);
        assert!(lcd.i2c().is_cursor_visible());
        assert!(!lcd.i2c().backlight());
    }

    #[test]
    fn test_scroll_display() {
        let mut lcd = started(LcdConfig::lcd1602());
        lcd.print("ABC");
        lcd.scroll_display_left();
        assert_eq!(lcd.i2c().display_shift(), 1);
        assert_eq!(&lcd.i2c().row_text(0).as_str()[..3], "BC ");

        lcd.scroll_display_right();
        lcd.scroll_display_right();
        assert_eq!(lcd.i2c().display_shift(), -1);
        assert_eq!(&lcd.i2c().row_text(0).as_str()[..4], " ABC");

        lcd.home();
        assert_eq!(lcd.i2c().display_shift(), 0);
    }

    #[test]
    fn test_right_to_left() {
        let mut lcd = started(LcdConfig::lcd1602());
        lcd.set_cursor(5, 0);
        lcd.right_to_left();
        lcd.print("abc");
        assert_eq!(&lcd.i2c().row_text(0).as_str()[..6], "   cba");

        lcd.left_to_right();
        lcd.set_cursor(0, 1);
        lcd.print("abc");
        assert_eq!(&lcd.i2c().row_text(1).as_str()[..3], "abc");
    }

    #[test]
    fn test_autoscroll() {
        let mut lcd = started(LcdConfig::lcd1602());
        lcd.autoscroll_on();
        lcd.print("ab");
        assert_eq!(lcd.i2c().display_shift(), 2);
        lcd.autoscroll_off();
        lcd.print("c");
        assert_eq!(lcd.i2c().display_shift(), 2);
    }

    #[test]
    fn test_backlight_toggles() {
        let mut lcd = started(LcdConfig::lcd1602());
        lcd.backlight_off();
        assert!(!lcd.i2c().backlight());
        lcd.backlight_on();
        assert!(lcd.i2c().backlight());
        lcd.set_backlight(false);
        assert!(!lcd.i2c().backlight());
    }

    #[test]
    fn test_ignores_other_addresses() {
        let config = LcdConfig::lcd1602();
        let mut lcd = LcdI2c::new(VirtualLcd::new(config.with_address(0x3F)), NoDelay, config);
        lcd.begin();
        lcd.print("x");
        assert!(!lcd.i2c().is_four_bit());
        assert_eq!(lcd.i2c().bytes_received(), 0);
    }
}
