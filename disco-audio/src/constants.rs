/// Interleaved stereo samples per half-frame (the unit of work processed
/// per DMA wake-up). Left samples sit at even indices, right at odd, so one
/// half-frame carries `AUDIO_BUF_SIZE / 2` sample pairs.
pub const AUDIO_BUF_SIZE: usize = 512;

/// Total size of each DMA transfer buffer: two contiguous half-frames.
pub const AUDIO_DMA_BUF_SIZE: usize = 2 * AUDIO_BUF_SIZE;

/// Real FFT input length for spectral analysis: half of one half-frame.
pub const FFT_LENGTH: usize = AUDIO_BUF_SIZE / 2;

/// One-sided magnitude spectrum length.
pub const SPECTRUM_BINS: usize = FFT_LENGTH / 2;

/// Full-scale range of a signed 16-bit sample, used for normalization.
pub const FULL_SCALE: f32 = 32768.0;

/// Number of level-meter accumulation calls per averaging window.
pub const LEVEL_WINDOW: u32 = 20;

/// Decay factor applied to the accumulated level at the end of each window.
pub const LEVEL_DECAY: f32 = 0.05;

/// Default echo delay line length, in scratch samples. Spans many
/// half-frames so the echo tail persists well past a single DMA cycle.
pub const ECHO_DELAY_SAMPLES: usize = 50 * AUDIO_BUF_SIZE;

// Half-frames must split into whole stereo sample pairs on both halves.
const _: () = assert!(AUDIO_BUF_SIZE % 4 == 0);
const _: () = assert!(FFT_LENGTH == 256, "rfft_256 is compiled for this length");
