//! Timing constants for the simulator.

use std::time::Duration;

/// Target frame time (~25 FPS). The main loop sleeps if frame completes early.
///
/// Roughly what a 100 kHz bus sustains for a full-panel redraw.
pub const FRAME_TIME: Duration = Duration::from_millis(40);

/// Animation time advanced per frame.
pub const TIME_STEP: f32 = 0.05;
