//! HD44780 Graph Demo Firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Cycles a 20x4 character LCD through the vertical bar, horizontal bar and
//! horizontal line graph modes with animated values.

#![no_std]
#![no_main]

mod config;
mod display;

use defmt::{debug, info, warn};
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::I2c;
use embassy_time::Timer;
use hd44780_i2c_graph::GraphMode;
use hd44780_i2c_graph::demo::{draw_frame, start_mode};
use {defmt_rtt as _, panic_probe as _};

use crate::config::{FRAME_INTERVAL_MS, MODE_FRAMES, TIME_STEP};
use crate::display::{GraphLcd, init_lcd, lcd_i2c_config};

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"pico2-lcd-graph"),
    embassy_rp::binary_info::rp_program_description!(c"HD44780 I2C bar and line graph demo"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("LCD graph demo starting...");

    let p = embassy_rp::init(Default::default());

    // On-board LED as a heartbeat
    let mut led = Output::new(p.PIN_25, Level::Low);

    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, lcd_i2c_config());
    let mut lcd = init_lcd(i2c);

    info!("LCD initialized!");

    let mut mode = GraphMode::VerticalBar;
    switch_mode(&mut lcd, mode);

    let mut frame_count = 0u32;

    info!("Starting main loop...");

    loop {
        let t = frame_count as f32 * TIME_STEP;
        draw_frame(&mut lcd, t);

        frame_count = frame_count.wrapping_add(1);

        if frame_count.is_multiple_of(MODE_FRAMES) {
            mode = mode.next();
            switch_mode(&mut lcd, mode);
        }

        // Toggle LED every 10 frames (~0.5 sec) to show loop is running
        if frame_count.is_multiple_of(10) {
            led.toggle();
        }

        Timer::after_millis(FRAME_INTERVAL_MS).await;
    }
}

/// Load `mode` on a cleared panel, logging the outcome.
fn switch_mode<I2C: embedded_hal::i2c::I2c>(
    lcd: &mut GraphLcd<I2C>,
    mode: GraphMode,
) {
    match start_mode(lcd, mode) {
        Ok(mode) => debug!("Graph mode {}", mode.label()),
        Err(err) => warn!("Graph init failed: {}", err),
    }
}
