//! Identity effect: reproduces the input on the output at unity gain.

use crate::dsp::to_sample;
use crate::effects::Effect;
use crate::scratch::ScratchStore;

/// Fixed gain applied to every sample. Unity, so the transform is the
/// identity modulo the float round-trip.
const GAIN: f32 = 1.0;

pub struct Passthrough;

impl Passthrough {
    pub const fn new() -> Self {
        Passthrough
    }
}

impl Effect for Passthrough {
    fn process(&mut self, out: &mut [i16], input: &[i16], _scratch: &mut ScratchStore<'_>) {
        debug_assert_eq!(out.len(), input.len());
        for (o, &i) in out.iter_mut().zip(input.iter()) {
            *o = to_sample(GAIN * i as f32);
        }
    }
}
