//! PCF8574 backpack protocol.
//!
//! The expander's eight outputs are wired to the controller as:
//!
//! | Bit | Signal |
//! |-----|--------|
//! | 0 | RS (register select) |
//! | 1 | RW (always low, writes only) |
//! | 2 | EN (enable strobe) |
//! | 3 | Backlight |
//! | 4..7 | D4..D7 |
//!
//! Every byte goes out as two nibbles, each latched by an enable pulse. The
//! protocol is write-only, so bus errors are dropped rather than reported.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// Register select: high for data, low for instructions.
pub const RS: u8 = 0x01;
/// Read/write select. Never set by this driver.
pub const RW: u8 = 0x02;
/// Enable strobe; the controller latches on its falling edge.
pub const EN: u8 = 0x04;
/// Backlight transistor.
pub const BACKLIGHT: u8 = 0x08;

/// Which controller register a byte is written to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Register {
    /// Instruction register (RS low).
    Instruction,
    /// Data register: DDRAM or CGRAM depending on the last address set.
    Data,
}

impl Register {
    #[inline]
    const fn bits(self) -> u8 {
        match self {
            Self::Instruction => 0,
            Self::Data => RS,
        }
    }
}

/// Owns the I2C bus and the delay provider for one backpack.
pub struct Expander<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    backlight: u8,
}

impl<I2C, D> Expander<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Wrap a bus and delay. The backlight starts off.
    pub const fn new(
        i2c: I2C,
        delay: D,
        address: u8,
    ) -> Self {
        Self {
            i2c,
            delay,
            address,
            backlight: 0,
        }
    }

    /// Borrow the underlying bus.
    pub const fn i2c(&self) -> &I2C { &self.i2c }

    /// Give back the bus and the delay.
    pub fn release(self) -> (I2C, D) { (self.i2c, self.delay) }

    /// Current backlight state.
    pub const fn backlight(&self) -> bool { self.backlight != 0 }

    /// Switch the backlight and push the new state to the port immediately.
    pub fn set_backlight(
        &mut self,
        on: bool,
    ) {
        self.backlight = if on { BACKLIGHT } else { 0 };
        self.write_port(0);
    }

    /// Write one byte to the port with the backlight bit merged in.
    pub fn write_port(
        &mut self,
        data: u8,
    ) {
        self.i2c.write(self.address, &[data | self.backlight]).ok();
    }

    /// Present a nibble (already in bits 4..7) and strobe it in.
    pub fn write_nibble(
        &mut self,
        nibble: u8,
    ) {
        self.write_port(nibble);
        self.pulse_enable(nibble);
    }

    /// Send a full byte as high nibble then low nibble.
    pub fn send(
        &mut self,
        value: u8,
        register: Register,
    ) {
        let high = value & 0xF0;
        let low = (value << 4) & 0xF0;
        self.write_nibble(high | register.bits());
        self.write_nibble(low | register.bits());
    }

    /// Block for `us` microseconds.
    #[inline]
    pub fn delay_us(
        &mut self,
        us: u32,
    ) {
        self.delay.delay_us(us);
    }

    /// Block for `ms` milliseconds.
    #[inline]
    pub fn delay_ms(
        &mut self,
        ms: u32,
    ) {
        self.delay.delay_ms(ms);
    }

    fn pulse_enable(
        &mut self,
        data: u8,
    ) {
        // Enable pulse must be >450ns
        self.write_port(data | EN);
        self.delay.delay_us(1);
        // Commands need >37us to settle
        self.write_port(data & !EN);
        self.delay.delay_us(50);
    }
}
