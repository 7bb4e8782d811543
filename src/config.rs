//! Display geometry and driver configuration.
//!
//! Character geometry is fixed to the 5x8 dot font. Panel size and bus address
//! are chosen per display with [`LcdConfig`].

// =============================================================================
// Character Geometry
// =============================================================================

/// Dot columns per character cell (5x8 font).
pub const CHAR_WIDTH_DOTS: u8 = 5;

/// Dot rows per character cell (5x8 font).
pub const CHAR_HEIGHT_DOTS: u8 = 8;

// =============================================================================
// Panel Limits
// =============================================================================

/// Widest supported panel (20x4 modules).
pub const MAX_COLUMNS: u8 = 20;

/// Tallest supported panel.
pub const MAX_ROWS: u8 = 4;

/// DDRAM address of the first cell of each physical row.
///
/// Rows 2 and 3 of a 4-line module continue lines 0 and 1 in DDRAM.
pub const ROW_OFFSETS: [u8; MAX_ROWS as usize] = [0x00, 0x40, 0x14, 0x54];

/// Usual address of a PCF8574 backpack with A0..A2 pulled high.
pub const DEFAULT_ADDRESS: u8 = 0x27;

const _: () = assert!(MAX_ROWS as usize == ROW_OFFSETS.len());
const _: () = assert!(MAX_COLUMNS * CHAR_WIDTH_DOTS < u8::MAX);

// =============================================================================
// Driver Configuration
// =============================================================================

/// Bus address and panel geometry of one display.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LcdConfig {
    /// 7-bit I2C address of the expander.
    pub address: u8,
    /// Characters per row, `1..=MAX_COLUMNS`.
    pub columns: u8,
    /// Number of rows, `1..=MAX_ROWS`.
    pub rows: u8,
    /// Backlight state applied at the end of `begin()`.
    pub backlight: bool,
}

impl LcdConfig {
    /// Create a configuration, clamping the geometry to the supported range.
    pub const fn new(
        address: u8,
        columns: u8,
        rows: u8,
    ) -> Self {
        Self {
            address,
            columns: clamp(columns, 1, MAX_COLUMNS),
            rows: clamp(rows, 1, MAX_ROWS),
            backlight: true,
        }
    }

    /// 16x2 module at the default address.
    pub const fn lcd1602() -> Self { Self::new(DEFAULT_ADDRESS, 16, 2) }

    /// 20x4 module at the default address.
    pub const fn lcd2004() -> Self { Self::new(DEFAULT_ADDRESS, 20, 4) }

    /// Same geometry at another bus address.
    #[must_use]
    pub const fn with_address(
        mut self,
        address: u8,
    ) -> Self {
        self.address = address;
        self
    }

    /// Copy with the geometry forced into the supported range.
    ///
    /// The fields are public, so a struct literal can bypass [`new`](Self::new).
    #[must_use]
    pub const fn clamped(self) -> Self {
        Self::new(self.address, self.columns, self.rows).with_backlight(self.backlight)
    }

    /// Same geometry with the backlight left off after `begin()`.
    #[must_use]
    pub const fn with_backlight(
        mut self,
        backlight: bool,
    ) -> Self {
        self.backlight = backlight;
        self
    }
}

impl Default for LcdConfig {
    fn default() -> Self { Self::lcd2004() }
}

const fn clamp(
    value: u8,
    min: u8,
    max: u8,
) -> u8 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

// =============================================================================
// Tests
// =============================================================================
