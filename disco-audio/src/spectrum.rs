//! One-sided magnitude spectrum of a just-produced output half-frame.
//!
//! The analyzer takes the first [`FFT_LENGTH`] samples of the half-frame as
//! a real-valued signal, runs a forward real FFT, and reduces each complex
//! bin to its magnitude. The window is the raw interleaved stereo data, as
//! the display has always shown it; de-interleaving a single channel first
//! would change every picture users calibrated against, so the conflation
//! is kept deliberately.
//!
//! Each call overwrites the previous result; the pipeline hands a copy to
//! the display through a latest-value slot, and a frame the display never
//! picks up is simply replaced by the next one.

use microfft::real::rfft_256;

use crate::constants::{FFT_LENGTH, SPECTRUM_BINS};

/// A complete one-sided magnitude spectrum, copyable across contexts.
#[derive(Clone, Copy)]
pub struct SpectrumFrame {
    pub bins: [f32; SPECTRUM_BINS],
}

impl SpectrumFrame {
    pub const fn zeroed() -> Self {
        SpectrumFrame {
            bins: [0.0; SPECTRUM_BINS],
        }
    }
}

pub struct SpectrumAnalyzer {
    input: [f32; FFT_LENGTH],
    magnitudes: [f32; SPECTRUM_BINS],
}

impl SpectrumAnalyzer {
    pub const fn new() -> Self {
        SpectrumAnalyzer {
            input: [0.0; FFT_LENGTH],
            magnitudes: [0.0; SPECTRUM_BINS],
        }
    }

    /// Compute the magnitude spectrum of the first [`FFT_LENGTH`] samples
    /// of `samples`.
    ///
    /// # Panics
    ///
    /// Panics if `samples` is shorter than [`FFT_LENGTH`].
    pub fn analyze(&mut self, samples: &[i16]) -> &[f32; SPECTRUM_BINS] {
        for (slot, &s) in self.input.iter_mut().zip(samples[..FFT_LENGTH].iter()) {
            *slot = s as f32;
        }

        let spectrum = rfft_256(&mut self.input);
        // The real coefficient at Nyquist is packed into bin 0's imaginary
        // part; drop it so bin 0 is the plain DC magnitude.
        spectrum[0].im = 0.0;

        for (mag, c) in self.magnitudes.iter_mut().zip(spectrum.iter()) {
            *mag = libm::sqrtf(c.re * c.re + c.im * c.im);
        }
        &self.magnitudes
    }

    /// The magnitudes from the most recent [`analyze`](Self::analyze) call.
    pub fn magnitudes(&self) -> &[f32; SPECTRUM_BINS] {
        &self.magnitudes
    }

    /// The most recent result as a copyable frame for cross-task handoff.
    pub fn frame(&self) -> SpectrumFrame {
        SpectrumFrame {
            bins: self.magnitudes,
        }
    }
}
