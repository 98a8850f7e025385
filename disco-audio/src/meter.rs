//! Smoothed per-channel level metering for diagnostic display.
//!
//! Each processed half-frame is rectified and averaged per channel (left at
//! even indices, right at odd), normalized to full scale, and accumulated.
//! Every [`LEVEL_WINDOW`](crate::constants::LEVEL_WINDOW) half-frames the
//! accumulated total is decayed by
//! [`LEVEL_DECAY`](crate::constants::LEVEL_DECAY) and snapshotted as the
//! instantaneous level, then the accumulator resets. With a 20-call window
//! and 0.05 decay a sustained full-scale signal reads ~1.0.
//!
//! The meter only ever sees the half just produced, so no stale samples
//! from the other half leak into the average.

use crate::constants::{FULL_SCALE, LEVEL_DECAY, LEVEL_WINDOW};

/// One smoothed level snapshot, per channel, in `[0.0, ~1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LevelReport {
    pub left: f32,
    pub right: f32,
}

pub struct LevelMeter {
    acc_left: f32,
    acc_right: f32,
    calls: u32,
    current: LevelReport,
}

impl LevelMeter {
    pub const fn new() -> Self {
        LevelMeter {
            acc_left: 0.0,
            acc_right: 0.0,
            calls: 0,
            current: LevelReport {
                left: 0.0,
                right: 0.0,
            },
        }
    }

    /// Accumulate one half-frame of interleaved stereo samples.
    ///
    /// Returns `Some(report)` when this call completes an averaging window,
    /// `None` otherwise.
    pub fn accumulate(&mut self, samples: &[i16]) -> Option<LevelReport> {
        debug_assert!(samples.len() % 2 == 0);
        let per_channel = (samples.len() / 2) as f32;

        let mut sum_left: u32 = 0;
        let mut sum_right: u32 = 0;
        for pair in samples.chunks_exact(2) {
            sum_left += pair[0].unsigned_abs() as u32;
            sum_right += pair[1].unsigned_abs() as u32;
        }
        self.acc_left += sum_left as f32 / per_channel / FULL_SCALE;
        self.acc_right += sum_right as f32 / per_channel / FULL_SCALE;

        self.calls += 1;
        if self.calls < LEVEL_WINDOW {
            return None;
        }

        self.current = LevelReport {
            left: self.acc_left * LEVEL_DECAY,
            right: self.acc_right * LEVEL_DECAY,
        };
        self.acc_left = 0.0;
        self.acc_right = 0.0;
        self.calls = 0;
        Some(self.current)
    }

    /// The most recent window snapshot, for polling.
    pub fn levels(&self) -> LevelReport {
        self.current
    }
}
