//! Threshold gate: samples whose magnitude exceeds the threshold are
//! attenuated by a large fixed factor; everything else passes through
//! unchanged.

use crate::dsp::{normalize, to_sample};
use crate::effects::Effect;
use crate::scratch::ScratchStore;

/// Gate threshold as a fraction of full scale.
const THRESHOLD: f32 = 0.001;
/// Division factor applied to samples above the threshold.
const ATTENUATION: f32 = 100_000.0;

pub struct NoiseGate {
    threshold: f32,
    attenuation: f32,
}

impl NoiseGate {
    pub const fn new() -> Self {
        NoiseGate {
            threshold: THRESHOLD,
            attenuation: ATTENUATION,
        }
    }

    /// Gate with custom threshold (fraction of full scale) and attenuation
    /// divisor.
    pub const fn with_params(threshold: f32, attenuation: f32) -> Self {
        NoiseGate {
            threshold,
            attenuation,
        }
    }
}

impl Effect for NoiseGate {
    fn process(&mut self, out: &mut [i16], input: &[i16], _scratch: &mut ScratchStore<'_>) {
        debug_assert_eq!(out.len(), input.len());
        for (o, &i) in out.iter_mut().zip(input.iter()) {
            // Magnitude comparison in normalized units; the 16-bit value is
            // only divided once the gate trips.
            if normalize(i).abs() > self.threshold {
                *o = to_sample(i as f32 / self.attenuation);
            } else {
                *o = i;
            }
        }
    }
}
