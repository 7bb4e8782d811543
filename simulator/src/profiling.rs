//! Bus traffic statistics.
//!
//! Counts the bytes the driver pushes through the expander each frame. The
//! graph renderer only rewrites cells whose extent changed, so the per-frame
//! figure drops sharply once values settle.

use std::time::{Duration, Instant};

use heapless::String;

/// Per-frame and cumulative I2C byte counts.
pub struct BusMetrics {
    /// Bytes sent in the last frame.
    pub frame_bytes: u32,
    pub frame_bytes_min: u32,
    pub frame_bytes_max: u32,
    frame_bytes_avg: f32,

    pub total_bytes: u64,
    pub total_frames: u64,

    start_time: Instant,
}

impl BusMetrics {
    const EMA_ALPHA: f32 = 0.1;

    pub fn new() -> Self {
        Self {
            frame_bytes: 0,
            frame_bytes_min: u32::MAX,
            frame_bytes_max: 0,
            frame_bytes_avg: 0.0,
            total_bytes: 0,
            total_frames: 0,
            start_time: Instant::now(),
        }
    }

    /// Record the bytes sent during one frame.
    pub fn record_frame(
        &mut self,
        bytes: u32,
    ) {
        self.frame_bytes = bytes;
        self.frame_bytes_min = self.frame_bytes_min.min(bytes);
        self.frame_bytes_max = self.frame_bytes_max.max(bytes);

        if self.total_frames == 0 {
            self.frame_bytes_avg = bytes as f32;
        } else {
            self.frame_bytes_avg =
                Self::EMA_ALPHA.mul_add(bytes as f32, (1.0 - Self::EMA_ALPHA) * self.frame_bytes_avg);
        }

        self.total_bytes += u64::from(bytes);
        self.total_frames += 1;
    }

    /// Smoothed bytes per frame.
    #[inline]
    pub const fn frame_bytes_avg(&self) -> u32 { self.frame_bytes_avg as u32 }

    /// Forget min/max after a mode switch, which redraws everything.
    pub fn reset_extremes(&mut self) {
        self.frame_bytes_min = u32::MAX;
        self.frame_bytes_max = 0;
    }

    #[inline]
    pub fn uptime(&self) -> Duration { self.start_time.elapsed() }

    /// Uptime as MM:SS.
    pub fn uptime_string(&self) -> String<8> {
        use core::fmt::Write;

        let secs = self.uptime().as_secs();
        let mut s = String::new();
        let _ = write!(s, "{:02}:{:02}", (secs / 60) % 100, secs % 60);
        s
    }
}

impl Default for BusMetrics {
    fn default() -> Self { Self::new() }
}
