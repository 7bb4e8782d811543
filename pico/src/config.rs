//! Board wiring and timing.

/// I2C bus clock. The PCF8574 is rated for 100 kHz.
pub const LCD_I2C_FREQUENCY: u32 = 100_000;

/// Backpack address (A0..A2 open).
pub const LCD_ADDRESS: u8 = 0x27;

/// Delay between graph updates.
pub const FRAME_INTERVAL_MS: u64 = 50;

/// Frames spent in each graph mode before moving to the next (~10 s).
pub const MODE_FRAMES: u32 = 200;

/// Animation time advanced per frame.
pub const TIME_STEP: f32 = 0.05;
