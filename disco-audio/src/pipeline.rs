//! The audio pipeline context: buffers, effect, meter, analyzer, and the
//! half-frame processing loop.
//!
//! One `AudioPipeline` exists per system, constructed at startup and owned
//! by the processing task. Everything the interrupt or display contexts
//! touch lives in [`PipelineShared`], which is all lock-free atomics and
//! sits in a `static`.
//!
//! ## Control flow
//!
//! ```text
//! DMA half IRQ ──► shared.sync.notify(First)  ─┐
//! DMA full IRQ ──► shared.sync.notify(Second) ─┤   (ISR: raise and return)
//!                                              ▼
//! processing task:  loop { pipeline.process_next(); }
//!                      │  effect ► meter ► spectrum, per completed half
//!                      ▼
//! display task:     shared.levels.take() / shared.spectrum.take()
//! ```
//!
//! The task strictly alternates First (HALF) then Second (FULL), exactly
//! once each per DMA cycle. Deadline overruns are counted by the signal
//! flags and logged here; the glitch itself is not recoverable.

use log::{debug, warn};

use crate::constants::AUDIO_DMA_BUF_SIZE;
use crate::effects::{ActiveEffect, Effect, EffectKind};
use crate::error::{ConfigError, StartError};
use crate::latest::LatestSlot;
use crate::meter::{LevelMeter, LevelReport};
use crate::scratch::ScratchStore;
use crate::spectrum::{SpectrumAnalyzer, SpectrumFrame};
use crate::sync::{DmaHalf, DoubleBufferSync};
use crate::transport::{AudioTransport, Direction, Indicator, InputSource, NoIndicator};

/// Startup configuration, fixed for the lifetime of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    pub effect: EffectKind,
    pub source: InputSource,
    pub sample_rate: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            effect: EffectKind::Passthrough,
            source: InputSource::LineIn,
            sample_rate: 48_000,
        }
    }
}

impl PipelineConfig {
    fn validate(&self, scratch_capacity: usize) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::InvalidSampleRate);
        }
        if let EffectKind::Echo { delay_samples } = self.effect {
            if delay_samples == 0 {
                return Err(ConfigError::InvalidDelay);
            }
            if delay_samples > scratch_capacity {
                return Err(ConfigError::DelayExceedsScratch {
                    delay: delay_samples,
                    capacity: scratch_capacity,
                });
            }
        }
        Ok(())
    }
}

/// State shared across contexts: the half/full signals the ISR raises and
/// the latest-value slots the display drains.
///
/// `const fn new` so one instance can live in a `static`.
pub struct PipelineShared {
    pub sync: DoubleBufferSync,
    pub levels: LatestSlot<LevelReport>,
    pub spectrum: LatestSlot<SpectrumFrame>,
}

impl PipelineShared {
    pub const fn new() -> Self {
        PipelineShared {
            sync: DoubleBufferSync::new(),
            levels: LatestSlot::new(),
            spectrum: LatestSlot::new(),
        }
    }
}

/// The processing-task side of the audio subsystem.
///
/// Owns both DMA transfer buffers (capture and playback, kept in lockstep),
/// the scratch store, and the active effect. The DMA controller works on
/// one half of each buffer while [`process_next`](Self::process_next) works
/// on the other.
pub struct AudioPipeline<'a, I: Indicator = NoIndicator> {
    input: [i16; AUDIO_DMA_BUF_SIZE],
    output: [i16; AUDIO_DMA_BUF_SIZE],
    scratch: ScratchStore<'a>,
    effect: ActiveEffect,
    meter: LevelMeter,
    analyzer: SpectrumAnalyzer,
    shared: &'a PipelineShared,
    indicator: I,
    config: PipelineConfig,
    /// The half the task must process next; the loop starts on First.
    next: DmaHalf,
    halves_processed: u32,
    /// Overrun total already reported to the log.
    overruns_logged: u32,
}

impl<'a> AudioPipeline<'a, NoIndicator> {
    /// Build a pipeline with no timing indicator wired.
    ///
    /// `scratch_mem` is the effect history region (SDRAM on the target); it
    /// is cleared here so startup never replays stale audio.
    pub fn new(
        config: PipelineConfig,
        scratch_mem: &'a mut [f32],
        shared: &'a PipelineShared,
    ) -> Result<Self, ConfigError> {
        Self::with_indicator(config, scratch_mem, shared, NoIndicator)
    }
}

impl<'a, I: Indicator> AudioPipeline<'a, I> {
    /// Build a pipeline that toggles `indicator` around each half-frame's
    /// processing for oscilloscope latency measurement.
    pub fn with_indicator(
        config: PipelineConfig,
        scratch_mem: &'a mut [f32],
        shared: &'a PipelineShared,
        indicator: I,
    ) -> Result<Self, ConfigError> {
        config.validate(scratch_mem.len())?;
        Ok(AudioPipeline {
            input: [0; AUDIO_DMA_BUF_SIZE],
            output: [0; AUDIO_DMA_BUF_SIZE],
            scratch: ScratchStore::new(scratch_mem),
            effect: ActiveEffect::new(config.effect),
            meter: LevelMeter::new(),
            analyzer: SpectrumAnalyzer::new(),
            shared,
            indicator,
            config,
            next: DmaHalf::First,
            halves_processed: 0,
            overruns_logged: 0,
        })
    }

    /// Hand both transfer buffers to the transport and begin the continuous
    /// capture+playback stream.
    pub fn start<T: AudioTransport>(
        &mut self,
        transport: &mut T,
    ) -> Result<(), StartError<T::Error>> {
        debug!(
            "starting transfers: {} samples per buffer, source {:?}, {} Hz",
            AUDIO_DMA_BUF_SIZE, self.config.source, self.config.sample_rate
        );
        transport
            .start_transfers(
                self.output.as_mut_ptr(),
                self.input.as_mut_ptr(),
                AUDIO_DMA_BUF_SIZE,
                self.config.source,
                self.config.sample_rate,
            )
            .map_err(StartError::Transport)
    }

    /// Block until the next expected half completes, process it, and return
    /// which half was handled.
    ///
    /// This is the body of the infinite audio loop: waits for HALF,
    /// processes `[0, N/2)`, waits for FULL, processes `[N/2, N)`, repeats.
    pub fn process_next(&mut self) -> DmaHalf {
        let half = self.next;
        self.shared.sync.wait(half);
        self.process_half(half);
        half
    }

    /// Non-blocking variant of [`process_next`](Self::process_next) for
    /// task bodies that block on their own signal primitive: processes the
    /// expected half if its completion is pending.
    pub fn try_service(&mut self) -> Option<DmaHalf> {
        let half = self.next;
        if !self.shared.sync.try_take(half) {
            return None;
        }
        self.process_half(half);
        Some(half)
    }

    fn process_half(&mut self, half: DmaHalf) {
        self.indicator.on();

        let range = half.range(AUDIO_DMA_BUF_SIZE);
        self.effect.process(
            &mut self.output[range.clone()],
            &self.input[range.clone()],
            &mut self.scratch,
        );

        let produced = &self.output[range];
        if let Some(report) = self.meter.accumulate(produced) {
            self.shared.levels.publish(report);
        }
        self.analyzer.analyze(produced);
        self.shared.spectrum.publish(self.analyzer.frame());

        self.indicator.off();

        self.next = half.other();
        self.halves_processed += 1;

        let overruns = self.shared.sync.overruns();
        if overruns > self.overruns_logged {
            warn!(
                "deadline overrun: {} half-frame(s) completed before the previous one was consumed",
                overruns - self.overruns_logged
            );
            self.overruns_logged = overruns;
        }
    }

    /// Report a mid-stream DMA fault and restart the affected direction.
    ///
    /// Transfer faults are not fatal: the stream continues best-effort on
    /// the other direction while this one is re-armed.
    pub fn on_transfer_error<T: AudioTransport>(
        &mut self,
        transport: &mut T,
        direction: Direction,
    ) -> Result<(), T::Error> {
        warn!("transfer fault on {:?} direction, restarting", direction);
        transport.restart(direction)
    }

    /// Capture-buffer half, writable. Models the DMA filling that half;
    /// simulation and tests inject input here.
    pub fn input_half_mut(&mut self, half: DmaHalf) -> &mut [i16] {
        &mut self.input[half.range(AUDIO_DMA_BUF_SIZE)]
    }

    /// Playback-buffer half just produced by the effect.
    pub fn output_half(&self, half: DmaHalf) -> &[i16] {
        &self.output[half.range(AUDIO_DMA_BUF_SIZE)]
    }

    /// Total halves processed since startup.
    pub fn halves_processed(&self) -> u32 {
        self.halves_processed
    }

    /// Deadline overruns observed so far.
    pub fn overruns(&self) -> u32 {
        self.shared.sync.overruns()
    }

    /// The configuration the pipeline was built with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
