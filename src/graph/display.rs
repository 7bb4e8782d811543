//! A display whose glyph slots belong to graphs.
//!
//! Wrapping a display in [`GraphDisplay`] is the point where the caller gives
//! up custom characters: the wrapper forwards text and control calls but has no
//! way to program glyphs except through [`init_graph`](GraphDisplay::init_graph).
//! [`release`](GraphDisplay::release) hands the display back.

use super::{GraphError, GraphMode, GraphRenderer, GraphValue};
use crate::display::{CharacterDisplay, DisplayControl, GlyphStore};

/// Display plus the graph renderer that owns its glyph slots.
pub struct GraphDisplay<T> {
    display: T,
    renderer: GraphRenderer,
}

impl<T> GraphDisplay<T>
where
    T: CharacterDisplay + GlyphStore,
{
    /// Take over `display`. No graph mode is loaded yet.
    pub const fn new(display: T) -> Self {
        Self {
            display,
            renderer: GraphRenderer::new(),
        }
    }

    /// Load a graph mode (or its numeric tag) into the glyph slots.
    pub fn init_graph<M>(
        &mut self,
        mode: M,
    ) -> Result<GraphMode, GraphError>
    where
        M: TryInto<GraphMode>,
        GraphError: From<M::Error>,
    {
        self.renderer.init(&mut self.display, mode)
    }

    /// See [`GraphRenderer::draw_horizontal`].
    pub fn draw_horizontal(
        &mut self,
        row: u8,
        column: u8,
        length: u8,
        value: impl Into<GraphValue>,
    ) {
        self.renderer.draw_horizontal(&mut self.display, row, column, length, value);
    }

    /// See [`GraphRenderer::draw_vertical`].
    pub fn draw_vertical(
        &mut self,
        row: u8,
        column: u8,
        length: u8,
        value: impl Into<GraphValue>,
    ) {
        self.renderer.draw_vertical(&mut self.display, row, column, length, value);
    }

    pub const fn mode(&self) -> Option<GraphMode> { self.renderer.mode() }

    pub const fn renderer(&self) -> &GraphRenderer { &self.renderer }

    /// Borrow the wrapped display.
    pub const fn display(&self) -> &T { &self.display }

    /// Give the display back. Its glyph slots still hold the graph glyphs.
    pub fn release(self) -> T { self.display }
}

impl<T> CharacterDisplay for GraphDisplay<T>
where
    T: CharacterDisplay,
{
    fn columns(&self) -> u8 { self.display.columns() }

    fn rows(&self) -> u8 { self.display.rows() }

    fn set_cursor(
        &mut self,
        column: u8,
        row: u8,
    ) {
        self.display.set_cursor(column, row);
    }

    fn write_char(
        &mut self,
        code: u8,
    ) {
        self.display.write_char(code);
    }

    fn clear(&mut self) { self.display.clear(); }
}

impl<T> DisplayControl for GraphDisplay<T>
where
    T: DisplayControl,
{
    fn set_display_on(
        &mut self,
        on: bool,
    ) {
        self.display.set_display_on(on);
    }

    fn set_cursor_visible(
        &mut self,
        visible: bool,
    ) {
        self.display.set_cursor_visible(visible);
    }

    fn set_blink(
        &mut self,
        blink: bool,
    ) {
        self.display.set_blink(blink);
    }

    fn set_backlight(
        &mut self,
        on: bool,
    ) {
        self.display.set_backlight(on);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LcdConfig;
    use crate::driver::LcdI2c;
    use crate::graph::glyphs::{BAR_PATTERN, synthesize_vertical};
    use crate::virtual_lcd::{NoDelay, VirtualLcd};

    type Lcd = LcdI2c<VirtualLcd, NoDelay>;

    fn graphs(config: LcdConfig) -> GraphDisplay<Lcd> {
        let mut lcd = LcdI2c::new(VirtualLcd::new(config), NoDelay, config);
        lcd.begin();
        GraphDisplay::new(lcd)
    }

    #[test]
    fn test_horizontal_bar_on_virtual_lcd() {
        let mut graphs = graphs(LcdConfig::lcd2004());
        graphs.init_graph(GraphMode::HorizontalBar).unwrap();
        graphs.set_cursor(0, 1);
        graphs.print("Oil");
        graphs.draw_horizontal(1, 4, 10, GraphValue::Percent(50));

        let vlcd = graphs.display().i2c();
        // 25 of 50 dots: four full cells then level 4
        let row: Vec<u8> = (0..20).map(|column| vlcd.cell(column, 1)).collect();
        assert_eq!(&row[..3], b"Oil");
        assert_eq!(row[4..13], [4, 4, 4, 4, 4, b' ', b' ', b' ', b' ']);
        assert_eq!(vlcd.glyph(4), [0x1F; 8]);
        assert_eq!(vlcd.glyph(0), [0b10000; 8]);
    }

    #[test]
    fn test_vertical_bar_with_oversized_config() {
        let mut graphs = graphs(LcdConfig {
            rows: 6,
            ..LcdConfig::lcd2004()
        });
        graphs.init_graph(GraphMode::VerticalBar).unwrap();
        graphs.draw_vertical(5, 0, 6, 47u8);

        // Clamped to the four real rows, so 31 of 32 dots
        let vlcd = graphs.display().i2c();
        for row in 0..4 {
            assert_eq!(vlcd.cell(0, row), 7);
        }
    }

    #[test]
    fn test_vertical_bar_on_virtual_lcd() {
        let mut graphs = graphs(LcdConfig::lcd2004());
        graphs.init_graph(1u8).unwrap();
        graphs.draw_vertical(3, 7, 4, 19u8);

        let vlcd = graphs.display().i2c();
        let glyphs = synthesize_vertical(BAR_PATTERN);
        for (slot, glyph) in glyphs.iter().enumerate() {
            assert_eq!(vlcd.glyph(slot as u8), *glyph);
        }
        assert_eq!(vlcd.cell(7, 3), 7);
        assert_eq!(vlcd.cell(7, 2), 7);
        assert_eq!(vlcd.cell(7, 1), 3);
        assert_eq!(vlcd.cell(7, 0), b' ');
    }

    #[test]
    fn test_repeated_draw_sends_less() {
        let mut graphs = graphs(LcdConfig::lcd2004());
        graphs.init_graph(GraphMode::HorizontalBar).unwrap();

        let start = graphs.display().i2c().bytes_received();
        graphs.draw_horizontal(0, 0, 20, 9u8);
        let first = graphs.display().i2c().bytes_received() - start;

        let start = graphs.display().i2c().bytes_received();
        graphs.draw_horizontal(0, 0, 20, 9u8);
        let second = graphs.display().i2c().bytes_received() - start;

        // First draw also blanks the 18 cells after the bar
        assert!(second < first);
        assert_eq!(graphs.display().i2c().cell(1, 0), 4);
    }

    #[test]
    fn test_unsupported_tag_leaves_display_alone() {
        let mut graphs = graphs(LcdConfig::lcd1602());
        graphs.init_graph(GraphMode::VerticalBar).unwrap();
        let before = graphs.display().i2c().bytes_received();

        assert_eq!(graphs.init_graph(0u8), Err(GraphError::UnsupportedGraphMode(0)));
        assert_eq!(graphs.display().i2c().bytes_received(), before);
        assert_eq!(graphs.mode(), Some(GraphMode::VerticalBar));
    }

    #[test]
    fn test_line_graph_on_virtual_lcd() {
        let mut graphs = graphs(LcdConfig::lcd1602());
        graphs.init_graph(GraphMode::HorizontalLine).unwrap();
        graphs.draw_horizontal(0, 0, 16, 0.5f32);
        let vlcd = graphs.display().i2c();
        // 40 of 80 dots: last lit dot 39 is level 4 of cell 7
        assert_eq!(vlcd.cell(7, 0), 4);
        assert_eq!(vlcd.glyph(4), [0b00001; 8]);
        assert_eq!(vlcd.row_text(0).bytes().filter(|&c| c != b' ').count(), 1);
    }

    #[test]
    fn test_control_forwarded() {
        let mut graphs = graphs(LcdConfig::lcd1602());
        graphs.set_backlight(false);
        graphs.set_cursor_visible(true);
        assert!(!graphs.display().i2c().backlight());
        assert!(graphs.display().i2c().is_cursor_visible());
        assert_eq!(graphs.columns(), 16);
        assert_eq!(graphs.rows(), 2);
    }
}
