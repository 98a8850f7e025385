//! End-to-end scenarios exercising the whole pipeline in software.
//!
//! The DMA hardware is simulated: the test writes a half of the capture
//! buffer, raises the matching completion signal, and lets the pipeline
//! service it, for as many cycles as the scenario needs.

#[cfg(test)]
mod tests {
    use crate::constants::{AUDIO_BUF_SIZE, SPECTRUM_BINS};
    use crate::effects::EffectKind;
    use crate::pipeline::{AudioPipeline, PipelineConfig, PipelineShared};
    use crate::sync::DmaHalf;
    use crate::transport::InputSource;

    /// A fixed-amplitude square wave over one half-frame, period 16 sample
    /// pairs, identical on both channels.
    fn square_half(amplitude: i16) -> [i16; AUDIO_BUF_SIZE] {
        core::array::from_fn(|i| {
            let pair = i / 2;
            if (pair / 8) % 2 == 0 {
                amplitude
            } else {
                -amplitude
            }
        })
    }

    #[test]
    fn thousand_cycles_of_passthrough_are_bit_exact() {
        let shared = PipelineShared::new();
        let mut scratch = [0.0f32; 8];
        let mut pipeline =
            AudioPipeline::new(PipelineConfig::default(), &mut scratch, &shared).unwrap();

        let wave = square_half(12000);
        let mut half = DmaHalf::First;
        for cycle in 0..2000u32 {
            pipeline.input_half_mut(half).copy_from_slice(&wave);
            shared.sync.notify(half);

            let serviced = pipeline.try_service();
            assert_eq!(serviced, Some(half), "cycle {cycle}: half missed");
            assert_eq!(
                pipeline.output_half(half),
                &wave,
                "cycle {cycle}: output not bit-exact"
            );

            half = half.other();
        }

        // 1000 HALF/FULL pairs, each processed exactly once.
        assert_eq!(pipeline.halves_processed(), 2000);
        assert_eq!(pipeline.overruns(), 0, "no half may be missed or duplicated");
        // Nothing left pending.
        assert_eq!(pipeline.try_service(), None);
    }

    #[test]
    fn square_wave_spectrum_reaches_the_display() {
        let shared = PipelineShared::new();
        let mut scratch = [0.0f32; 8];
        let mut pipeline =
            AudioPipeline::new(PipelineConfig::default(), &mut scratch, &shared).unwrap();

        let wave = square_half(12000);
        pipeline.input_half_mut(DmaHalf::First).copy_from_slice(&wave);
        shared.sync.notify(DmaHalf::First);
        pipeline.try_service();

        let frame = shared.spectrum.take().expect("spectrum after first half");
        assert_eq!(frame.bins.len(), SPECTRUM_BINS);
        assert!(
            frame.bins.iter().any(|&m| m > 0.0),
            "square wave must show energy somewhere"
        );
    }

    #[test]
    fn echo_tail_survives_many_cycles_of_silence() {
        let shared = PipelineShared::new();
        // Delay of exactly two half-frames: the echo of half N surfaces in
        // half N+2.
        let delay = 2 * AUDIO_BUF_SIZE;
        let mut scratch = [0.0f32; 2 * AUDIO_BUF_SIZE];
        let config = PipelineConfig {
            effect: EffectKind::Echo {
                delay_samples: delay,
            },
            source: InputSource::LineIn,
            sample_rate: 48_000,
        };
        let mut pipeline = AudioPipeline::new(config, &mut scratch, &shared).unwrap();

        // Cycle 0, first half: impulse. Everything after: silence.
        pipeline.input_half_mut(DmaHalf::First)[0] = 20000;
        shared.sync.notify(DmaHalf::First);
        pipeline.try_service();
        let direct = pipeline.output_half(DmaHalf::First)[0];
        assert_ne!(direct, 0);

        shared.sync.notify(DmaHalf::Second);
        pipeline.try_service();
        assert!(pipeline.output_half(DmaHalf::Second).iter().all(|&s| s == 0));

        // Third serviced half: the delay line wraps, the echo returns at
        // offset 0 of the first half, quieter than the direct sound.
        pipeline.input_half_mut(DmaHalf::First).fill(0);
        shared.sync.notify(DmaHalf::First);
        pipeline.try_service();
        let echo = pipeline.output_half(DmaHalf::First)[0];
        assert_ne!(echo, 0, "echo must reappear after the delay elapses");
        assert!(echo.unsigned_abs() < direct.unsigned_abs());
    }

    #[test]
    fn sustained_signal_produces_level_reports() {
        use crate::constants::LEVEL_WINDOW;

        let shared = PipelineShared::new();
        let mut scratch = [0.0f32; 8];
        let mut pipeline =
            AudioPipeline::new(PipelineConfig::default(), &mut scratch, &shared).unwrap();

        // Half-scale on the left channel only.
        let signal: [i16; AUDIO_BUF_SIZE] =
            core::array::from_fn(|i| if i % 2 == 0 { 16384 } else { 0 });

        let mut half = DmaHalf::First;
        let mut reports = 0u32;
        for _ in 0..3 * LEVEL_WINDOW {
            pipeline.input_half_mut(half).copy_from_slice(&signal);
            shared.sync.notify(half);
            pipeline.try_service();
            if let Some(report) = shared.levels.take() {
                reports += 1;
                assert!((report.left - 0.5).abs() < 0.01, "left {}", report.left);
                assert_eq!(report.right, 0.0);
            }
            half = half.other();
        }
        assert_eq!(reports, 3, "one report per full averaging window");
    }

    #[test]
    fn stale_spectrum_frames_are_overwritten_not_queued() {
        let shared = PipelineShared::new();
        let mut scratch = [0.0f32; 8];
        let mut pipeline =
            AudioPipeline::new(PipelineConfig::default(), &mut scratch, &shared).unwrap();

        // Two halves processed without the display draining in between.
        pipeline.input_half_mut(DmaHalf::First).fill(1000);
        shared.sync.notify(DmaHalf::First);
        pipeline.try_service();

        pipeline.input_half_mut(DmaHalf::Second).fill(0);
        shared.sync.notify(DmaHalf::Second);
        pipeline.try_service();

        // Only the newest frame (silence) is available.
        let frame = shared.spectrum.take().expect("latest frame");
        assert!(frame.bins.iter().all(|&m| m == 0.0));
        assert!(shared.spectrum.take().is_none());
    }
}
