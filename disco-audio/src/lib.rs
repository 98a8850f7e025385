//! # disco-audio
//!
//! A `no_std`, zero-allocation real-time audio pipeline for the
//! STM32F746 Discovery written in pure Rust. It continuously captures
//! interleaved stereo samples from the codec via double-buffered DMA,
//! applies a selectable per-half-frame effect, plays the result back, and
//! produces a magnitude spectrum and smoothed level readings for an
//! on-screen display.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Sync | [`sync`] | Half/full DMA completion signals with overrun accounting |
//! | Memory | [`scratch`] | Wrap-around float history for stateful effects |
//! | DSP | [`effects`] / [`dsp`] | Passthrough, echo, and noise-gate transforms |
//! | Analysis | [`meter`] / [`spectrum`] | Level metering and real-FFT magnitude spectrum |
//! | Handoff | [`latest`] | Single-slot latest-value channels to the display task |
//! | Seams | [`transport`] | Codec/DMA driver and timing-indicator traits |
//! | Core | [`pipeline`] | The `AudioPipeline` context and processing loop |
//!
//! ## Quick start
//!
//! ```ignore
//! use disco_audio::pipeline::{AudioPipeline, PipelineConfig, PipelineShared};
//! use disco_audio::sync::DmaHalf;
//!
//! static SHARED: PipelineShared = PipelineShared::new();
//!
//! // At startup (scratch points at an SDRAM region):
//! let mut pipeline = AudioPipeline::new(PipelineConfig::default(), scratch, &SHARED)?;
//! pipeline.start(&mut sai_transport)?;
//!
//! // In the DMA half/full completion ISRs:
//! SHARED.sync.notify(DmaHalf::First);  // half-transfer callback
//! SHARED.sync.notify(DmaHalf::Second); // full-transfer callback
//!
//! // The processing task:
//! loop { pipeline.process_next(); }
//!
//! // The display task, at its own pace:
//! if let Some(frame) = SHARED.spectrum.take() { draw_spectrum(&frame.bins); }
//! if let Some(levels) = SHARED.levels.take() { draw_levels(levels); }
//! ```
//!
//! ## Audio parameters
//!
//! - **Half-frame:** 512 interleaved samples ([`constants::AUDIO_BUF_SIZE`])
//! - **Transfer buffer:** 1024 samples, two halves ([`constants::AUDIO_DMA_BUF_SIZE`])
//! - **Sample format:** `i16`, left on even indices, right on odd
//! - **Spectrum:** 256-point real FFT, 128 magnitude bins
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `gpio` | yes | [`transport::PinIndicator`] over `embedded-hal` |

#![no_std]

pub mod constants;
pub mod dsp;
pub mod effects;
pub mod error;
pub mod latest;
pub mod meter;
pub mod pipeline;
pub mod scratch;
pub mod spectrum;
pub mod sync;
pub mod transport;

#[cfg(test)]
mod integration_tests;
