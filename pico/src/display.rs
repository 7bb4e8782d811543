//! HD44780 20x4 module on a PCF8574 I2C backpack.
//!
//! Pin mapping:
//! - SDA: GPIO4 (I2C0 SDA)
//! - SCL: GPIO5 (I2C0 SCL)
//! - VCC: VBUS (5V module, backpack pull-ups removed so the bus idles at 3.3V)

use embassy_rp::i2c::Config as I2cConfig;
use embassy_time::Delay;
use embedded_hal::i2c::I2c;
use hd44780_i2c_graph::{GraphDisplay, LcdConfig, LcdI2c};

use crate::config::{LCD_ADDRESS, LCD_I2C_FREQUENCY};

/// LCD driver with its glyph slots handed to the graph renderer.
pub type GraphLcd<I2C> = GraphDisplay<LcdI2c<I2C, Delay>>;

/// Run the power-on sequence and take over the glyph slots.
///
/// Blocks for a bit over a second (the controller needs its own reset time).
pub fn init_lcd<I2C: I2c>(i2c: I2C) -> GraphLcd<I2C> {
    let mut lcd = LcdI2c::new(i2c, Delay, LcdConfig::lcd2004().with_address(LCD_ADDRESS));
    lcd.begin();
    GraphDisplay::new(lcd)
}

/// I2C configuration for the backpack.
pub fn lcd_i2c_config() -> I2cConfig {
    let mut config = I2cConfig::default();
    config.frequency = LCD_I2C_FREQUENCY;
    config
}
