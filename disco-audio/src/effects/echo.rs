//! Feedback echo over a scratch-store delay line.
//!
//! The delay line cursor lives in the effect and persists across frames, so
//! the delay length is independent of the half-frame size: with the stock
//! settings one echo period spans 50 half-frames of samples.
//!
//! Per sample:
//!
//! ```text
//! delayed  = scratch[cursor]
//! fb       = in + FEEDBACK * delayed
//! out      = DRY * in + WET * fb
//! scratch[cursor] = out            (the *output* goes back in the line)
//! cursor   = (cursor + 1) % delay
//! ```

use crate::dsp::to_sample;
use crate::effects::Effect;
use crate::scratch::ScratchStore;

/// Dry (unprocessed) mix level.
const DRY: f32 = 0.4;
/// Wet (delayed) mix level.
const WET: f32 = 0.6;
/// Feedback gain applied to the delayed sample.
const FEEDBACK: f32 = 0.4;

pub struct Echo {
    cursor: usize,
    delay: usize,
}

impl Echo {
    /// Create an echo with a delay line of `delay_samples` scratch samples.
    ///
    /// The pipeline validates at startup that the delay fits the scratch
    /// capacity and is nonzero.
    pub const fn new(delay_samples: usize) -> Self {
        Echo {
            cursor: 0,
            delay: delay_samples,
        }
    }

    /// Delay line length in samples.
    pub fn delay_samples(&self) -> usize {
        self.delay
    }
}

impl Effect for Echo {
    fn process(&mut self, out: &mut [i16], input: &[i16], scratch: &mut ScratchStore<'_>) {
        debug_assert_eq!(out.len(), input.len());
        debug_assert!(self.delay > 0 && self.delay <= scratch.capacity());

        for (o, &i) in out.iter_mut().zip(input.iter()) {
            let delayed = scratch.read(self.cursor);
            let fb = i as f32 + FEEDBACK * delayed;
            let sample = DRY * i as f32 + WET * fb;
            scratch.write(sample, self.cursor);
            self.cursor += 1;
            if self.cursor == self.delay {
                self.cursor = 0;
            }
            *o = to_sample(sample);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: usize = 8;

    fn process_frames(echo: &mut Echo, scratch: &mut ScratchStore<'_>, frames: &[&[i16]]) -> [i16; 64] {
        let mut collected = [0i16; 64];
        let mut n = 0;
        for frame in frames {
            let mut out = [0i16; 64];
            echo.process(&mut out[..frame.len()], frame, scratch);
            collected[n..n + frame.len()].copy_from_slice(&out[..frame.len()]);
            n += frame.len();
        }
        collected
    }

    #[test]
    fn impulse_passes_at_unity_mix_on_first_pass() {
        let mut mem = [0.0f32; DELAY];
        let mut scratch = ScratchStore::new(&mut mem);
        let mut echo = Echo::new(DELAY);

        let mut input = [0i16; 16];
        input[0] = 32767;
        let mut out = [0i16; 16];
        echo.process(&mut out, &input, &mut scratch);

        // Zeroed scratch: the delayed term is 0, so out[0] is the dry mix
        // plus the wet path carrying the bare input.
        assert_eq!(out[0], to_sample(DRY * 32767.0 + WET * 32767.0));
        for n in 1..DELAY {
            assert_eq!(out[n], 0, "no signal expected before the echo returns");
        }
    }

    #[test]
    fn echo_reappears_after_the_delay_elapses() {
        let mut mem = [0.0f32; DELAY];
        let mut scratch = ScratchStore::new(&mut mem);
        let mut echo = Echo::new(DELAY);

        let mut input = [0i16; 16];
        input[0] = 32767;
        let mut out = [0i16; 16];
        echo.process(&mut out, &input, &mut scratch);

        // The line stored the full sample value at position 0; when the
        // cursor wraps, the echo comes back scaled by WET * FEEDBACK.
        let stored = DRY * 32767.0 + WET * 32767.0;
        let expected = to_sample(WET * (FEEDBACK * stored));
        assert_eq!(out[DELAY], expected);
        assert_ne!(out[DELAY], 0);
    }

    #[test]
    fn delay_line_persists_across_frames() {
        let mut mem = [0.0f32; DELAY];
        let mut scratch = ScratchStore::new(&mut mem);
        let mut echo = Echo::new(DELAY);

        // Impulse in the first 4-sample frame, silence after: the echo must
        // surface in a later frame, DELAY samples after the impulse.
        let mut first = [0i16; 4];
        first[0] = 10000;
        let silence = [0i16; 4];
        let out = process_frames(
            &mut echo,
            &mut scratch,
            &[&first, &silence, &silence, &silence],
        );

        let stored = DRY * 10000.0 + WET * 10000.0;
        assert_eq!(out[0], to_sample(stored));
        assert_eq!(out[DELAY], to_sample(WET * (FEEDBACK * stored)));
        for n in 1..DELAY {
            assert_eq!(out[n], 0);
        }
    }

    #[test]
    fn cursor_wraps_instead_of_growing() {
        let mut mem = [0.0f32; DELAY];
        let mut scratch = ScratchStore::new(&mut mem);
        let mut echo = Echo::new(DELAY);

        // Process far more samples than the delay length; any cursor escape
        // would panic on the scratch bounds check.
        let input = [1000i16; 64];
        let mut out = [0i16; 64];
        for _ in 0..10 {
            echo.process(&mut out, &input, &mut scratch);
        }
        assert!(echo.cursor < DELAY);
    }
}
