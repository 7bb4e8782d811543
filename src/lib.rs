//! HD44780 character LCD driver over a PCF8574 I2C backpack.
//!
//! The crate is split into three layers:
//!
//! - [`driver`]: the bus expander protocol, the HD44780 instruction set and the
//!   [`LcdI2c`](driver::LcdI2c) driver with cursor, mode and text primitives
//! - [`graph`]: bar and line graphs drawn with the controller's eight
//!   programmable glyph slots, redrawn incrementally per row or column
//! - [`virtual_lcd`]: a logical model of the expander + controller pair used by
//!   the tests and the desktop simulator
//! - [`demo`]: the animated graphs shown by the simulator and the firmware
//!
//! The graph renderer only talks to the [`display`] traits, so it can be driven
//! against any character display, not just the I2C driver.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the firmware builds the crate as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

#[macro_use]
mod fmt;

pub mod config;
pub mod demo;
pub mod display;
pub mod driver;
pub mod graph;
pub mod virtual_lcd;

#[cfg(test)]
mod mock;

pub use config::LcdConfig;
pub use display::{CharacterDisplay, DisplayControl, GlyphBitmap, GlyphStore};
pub use driver::LcdI2c;
pub use graph::{GraphDisplay, GraphError, GraphMode, GraphRenderer, GraphValue};
