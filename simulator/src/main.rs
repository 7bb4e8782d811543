//! HD44780 graph simulator for Windows/Desktop.
//!
//! Runs the real driver against a [`VirtualLcd`] and draws the panel with
//! the embedded-graphics-simulator crate.
//!
//! Keys:
//! - `V` / `H` / `L`: vertical bar / horizontal bar / horizontal line
//! - `N`: next mode
//! - `B`: toggle backlight
//! - `Q` or closing the window: quit

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod event_log;
mod layout;
mod panel;
mod profiling;
mod timing;

use std::cell::RefCell;
use std::thread;
use std::time::Instant;

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use embedded_hal_bus::i2c::RefCellDevice;
use hd44780_i2c_graph::demo::{draw_frame, start_mode};
use hd44780_i2c_graph::virtual_lcd::{NoDelay, VirtualLcd};
use hd44780_i2c_graph::{DisplayControl, GraphDisplay, GraphMode, LcdConfig, LcdI2c};
use heapless::String;
use profont::{PROFONT_9_POINT, PROFONT_12_POINT};

use crate::event_log::EventLog;
use crate::layout::{
    BACKGROUND,
    HIGHLIGHT_COLOR,
    HINT_COLOR,
    LOG_COLOR,
    LOG_LINES,
    SCREEN_HEIGHT,
    SCREEN_WIDTH,
    STATUS_LINE_HEIGHT,
    STATUS_X,
    STATUS_Y,
    TEXT_COLOR,
    WINDOW_SCALE,
};
use crate::panel::draw_panel;
use crate::profiling::BusMetrics;
use crate::timing::{FRAME_TIME, TIME_STEP};

fn main() {
    let config = LcdConfig::lcd2004();
    let bus = RefCell::new(VirtualLcd::new(config));

    let mut lcd = LcdI2c::new(RefCellDevice::new(&bus), NoDelay, config);
    lcd.begin();
    let mut graphs = GraphDisplay::new(lcd);

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("HD44780 I2C Graph Sim", &output_settings);

    let mut log = EventLog::new();
    log.push_fmt(format_args!("LCD {}x{} at {:#04x}", config.columns, config.rows, config.address));

    let mut metrics = BusMetrics::new();
    let mut mode = GraphMode::VerticalBar;
    let mut backlight = config.backlight;
    let mut pending_mode = Some(mode);
    let mut t = 0.0f32;

    loop {
        let frame_start = Instant::now();

        // Handle events
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::V => pending_mode = Some(GraphMode::VerticalBar),
                        Keycode::H => pending_mode = Some(GraphMode::HorizontalBar),
                        Keycode::L => pending_mode = Some(GraphMode::HorizontalLine),
                        Keycode::N => pending_mode = Some(mode.next()),
                        Keycode::B => {
                            backlight = !backlight;
                            graphs.set_backlight(backlight);
                            log.push(if backlight { "Backlight: ON" } else { "Backlight: OFF" });
                        }
                        Keycode::Q => return,
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        bus.borrow_mut().reset_counter();

        if let Some(next) = pending_mode.take() {
            match start_mode(&mut graphs, next) {
                Ok(loaded) => {
                    mode = loaded;
                    metrics.reset_extremes();
                    log.push_fmt(format_args!("Mode: {} ({} glyphs)", loaded.label(), loaded.glyph_count()));
                }
                Err(err) => log.push_fmt(format_args!("Error: {err}")),
            }
        }

        draw_frame(&mut graphs, t);
        metrics.record_frame(bus.borrow().bytes_received());

        display.clear(BACKGROUND).ok();
        draw_panel(&mut display, &bus.borrow());
        draw_status(&mut display, mode, &metrics, &log);
        window.update(&display);

        t += TIME_STEP;

        let elapsed = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
    }
}

/// Mode, bus statistics, key hints and the newest log lines.
fn draw_status(
    display: &mut SimulatorDisplay<Rgb565>,
    mode: GraphMode,
    metrics: &BusMetrics,
    log: &EventLog,
) {
    let title_style = MonoTextStyle::new(&PROFONT_12_POINT, HIGHLIGHT_COLOR);
    let text_style = MonoTextStyle::new(&PROFONT_9_POINT, TEXT_COLOR);
    let hint_style = MonoTextStyle::new(&PROFONT_9_POINT, HINT_COLOR);
    let log_style = MonoTextStyle::new(&PROFONT_9_POINT, LOG_COLOR);

    let mut y = STATUS_Y;
    let mut line: String<64> = String::new();
    let _ = write!(line, "{}  UP {}", mode.label(), metrics.uptime_string());
    Text::new(&line, Point::new(STATUS_X, y), title_style).draw(display).ok();

    y += STATUS_LINE_HEIGHT;
    line.clear();
    let _ = write!(
        line,
        "BUS {} B/frame  avg {}  min {}  max {}",
        metrics.frame_bytes,
        metrics.frame_bytes_avg(),
        metrics.frame_bytes_min,
        metrics.frame_bytes_max
    );
    Text::new(&line, Point::new(STATUS_X, y), text_style).draw(display).ok();

    y += STATUS_LINE_HEIGHT;
    Text::new("V/H/L mode  N next  B backlight  Q quit", Point::new(STATUS_X, y), hint_style)
        .draw(display)
        .ok();

    for entry in log.tail(LOG_LINES) {
        y += STATUS_LINE_HEIGHT;
        line.clear();
        let _ = write!(line, "> {entry}");
        Text::new(&line, Point::new(STATUS_X, y), log_style).draw(display).ok();
    }
}
