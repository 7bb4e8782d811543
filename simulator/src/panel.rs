//! Dot-matrix rendering of the virtual LCD.
//!
//! Glyph codes 0..=15 are drawn from the controller's CGRAM. Everything else
//! is rasterized from `FONT_5X8` into the same 5x8 dot grid, which is close to
//! the HD44780 character ROM for printable ASCII.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::pixelcolor::{BinaryColor, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use hd44780_i2c_graph::GlyphBitmap;
use hd44780_i2c_graph::config::{CHAR_HEIGHT_DOTS, CHAR_WIDTH_DOTS};
use hd44780_i2c_graph::virtual_lcd::VirtualLcd;

use crate::layout::{
    BEZEL,
    BEZEL_COLOR,
    CELL_HEIGHT,
    CELL_WIDTH,
    DOT_OFF_DARK,
    DOT_OFF_LIT,
    DOT_ON_DARK,
    DOT_ON_LIT,
    DOT_PITCH,
    DOT_SIZE,
    GLASS_DARK,
    GLASS_LIT,
    PANEL_X,
    PANEL_Y,
};

/// Highest character code mapped to CGRAM (codes 8..=15 alias 0..=7).
const LAST_CGRAM_CODE: u8 = 0x0F;

/// Colours for one backlight state.
#[derive(Clone, Copy)]
struct Palette {
    glass: Rgb565,
    dot_on: Rgb565,
    dot_off: Rgb565,
}

impl Palette {
    const fn for_backlight(on: bool) -> Self {
        if on {
            Self {
                glass: GLASS_LIT,
                dot_on: DOT_ON_LIT,
                dot_off: DOT_OFF_LIT,
            }
        } else {
            Self {
                glass: GLASS_DARK,
                dot_on: DOT_ON_DARK,
                dot_off: DOT_OFF_DARK,
            }
        }
    }
}

/// Draw the bezel, the glass and every cell of `lcd`.
pub fn draw_panel<D>(
    target: &mut D,
    lcd: &VirtualLcd,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let config = lcd.config();
    let palette = Palette::for_backlight(lcd.backlight());
    let size = Size::new(
        CELL_WIDTH * u32::from(config.columns) + BEZEL * 2,
        CELL_HEIGHT * u32::from(config.rows) + BEZEL * 2,
    );
    let origin = Point::new(PANEL_X - BEZEL as i32, PANEL_Y - BEZEL as i32);

    Rectangle::new(origin - Point::new(2, 2), size + Size::new(4, 4))
        .into_styled(PrimitiveStyle::with_fill(BEZEL_COLOR))
        .draw(target)
        .ok();
    Rectangle::new(origin, size)
        .into_styled(PrimitiveStyle::with_fill(palette.glass))
        .draw(target)
        .ok();

    for row in 0..config.rows {
        for column in 0..config.columns {
            let bitmap = if lcd.is_display_on() { cell_bitmap(lcd, lcd.cell(column, row)) } else { [0; 8] };
            let top_left = Point::new(
                PANEL_X + (u32::from(column) * CELL_WIDTH) as i32,
                PANEL_Y + (u32::from(row) * CELL_HEIGHT) as i32,
            );
            draw_cell(target, top_left, &bitmap, palette);
        }
    }
}

/// Dot pattern shown for a character code.
fn cell_bitmap(
    lcd: &VirtualLcd,
    code: u8,
) -> GlyphBitmap {
    if code <= LAST_CGRAM_CODE {
        return lcd.glyph(code);
    }

    let mut capture = CellCapture::default();
    let mut utf8 = [0u8; 4];
    let text = char::from(code).encode_utf8(&mut utf8);
    let style = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);
    Text::with_baseline(text, Point::zero(), style, Baseline::Top)
        .draw(&mut capture)
        .ok();
    capture.bitmap
}

fn draw_cell<D>(
    target: &mut D,
    top_left: Point,
    bitmap: &GlyphBitmap,
    palette: Palette,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let dot = Size::new(DOT_SIZE, DOT_SIZE);
    for (y, bits) in bitmap.iter().enumerate() {
        for x in 0..CHAR_WIDTH_DOTS {
            let lit = bits & (0x10 >> x) != 0;
            let color = if lit { palette.dot_on } else { palette.dot_off };
            let position = top_left + Point::new((u32::from(x) * DOT_PITCH) as i32, (y as u32 * DOT_PITCH) as i32);
            Rectangle::new(position, dot)
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(target)
                .ok();
        }
    }
}

// =============================================================================
// Font capture
// =============================================================================

/// One-cell draw target that turns font pixels into a glyph bitmap.
#[derive(Default)]
struct CellCapture {
    bitmap: GlyphBitmap,
}

impl OriginDimensions for CellCapture {
    fn size(&self) -> Size { Size::new(u32::from(CHAR_WIDTH_DOTS), u32::from(CHAR_HEIGHT_DOTS)) }
}

impl DrawTarget for CellCapture {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let inside = (0..i32::from(CHAR_WIDTH_DOTS)).contains(&point.x)
                && (0..i32::from(CHAR_HEIGHT_DOTS)).contains(&point.y);
            if inside && color.is_on() {
                self.bitmap[point.y as usize] |= 0x10 >> point.x;
            }
        }
        Ok(())
    }
}
