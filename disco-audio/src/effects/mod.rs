//! Per-frame audio effects.
//!
//! An effect transforms one half-frame of interleaved stereo input into one
//! half-frame of interleaved stereo output, synchronously, inside the
//! half-frame deadline. Exactly one effect is active at a time, selected
//! once at startup from [`PipelineConfig`](crate::pipeline::PipelineConfig)
//! rather than by editing source.
//!
//! | Effect | State | Description |
//! |--------|-------|-------------|
//! | [`Passthrough`] | none | Unity-gain copy |
//! | [`Echo`] | scratch delay line | Feedback echo with wet/dry mix |
//! | [`NoiseGate`] | none | Attenuates samples above a threshold |

mod echo;
mod noise_gate;
mod passthrough;

pub use echo::Echo;
pub use noise_gate::NoiseGate;
pub use passthrough::Passthrough;

use crate::constants::ECHO_DELAY_SAMPLES;
use crate::scratch::ScratchStore;

/// A per-half-frame stereo transform.
///
/// `out` and `input` always have the same length; implementations must
/// write every output sample exactly once and must not retain references
/// across invocations. There is no error return: numeric overflow saturates
/// silently.
pub trait Effect {
    fn process(&mut self, out: &mut [i16], input: &[i16], scratch: &mut ScratchStore<'_>);
}

/// Effect selection, chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Passthrough,
    Echo { delay_samples: usize },
    NoiseGate,
}

impl EffectKind {
    /// Echo with the stock delay of [`ECHO_DELAY_SAMPLES`].
    pub const fn echo() -> Self {
        EffectKind::Echo {
            delay_samples: ECHO_DELAY_SAMPLES,
        }
    }
}

/// The one active effect instance, dispatched without allocation.
pub enum ActiveEffect {
    Passthrough(Passthrough),
    Echo(Echo),
    NoiseGate(NoiseGate),
}

impl ActiveEffect {
    pub fn new(kind: EffectKind) -> Self {
        match kind {
            EffectKind::Passthrough => ActiveEffect::Passthrough(Passthrough::new()),
            EffectKind::Echo { delay_samples } => ActiveEffect::Echo(Echo::new(delay_samples)),
            EffectKind::NoiseGate => ActiveEffect::NoiseGate(NoiseGate::new()),
        }
    }
}

impl Effect for ActiveEffect {
    fn process(&mut self, out: &mut [i16], input: &[i16], scratch: &mut ScratchStore<'_>) {
        match self {
            ActiveEffect::Passthrough(e) => e.process(out, input, scratch),
            ActiveEffect::Echo(e) => e.process(out, input, scratch),
            ActiveEffect::NoiseGate(e) => e.process(out, input, scratch),
        }
    }
}
