//! Collaborator seams: the codec/DMA transport and the timing indicator.
//!
//! Board bring-up, SAI/DMA register programming, and the codec register
//! protocol live behind [`AudioTransport`]; the pipeline only ever asks it
//! to start the lockstep capture+playback transfers and, on a mid-stream
//! fault, to restart one direction.

use crate::sync::DmaHalf;

/// Audio input selector routed to the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// The line-in connector.
    LineIn,
    /// The on-board digital microphone pair.
    DigitalMic,
}

/// One direction of the lockstep transfer pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Capture,
    Playback,
}

/// The codec/SAI/DMA driver seam.
///
/// `start_transfers` receives raw pointers because the DMA controller
/// retains the buffer addresses for the lifetime of the stream; the
/// implementation programs them into hardware and arranges for
/// [`DoubleBufferSync::notify`](crate::sync::DoubleBufferSync::notify) to be
/// called from the half/full completion interrupts.
pub trait AudioTransport {
    type Error;

    /// Begin simultaneous continuous capture and playback over two
    /// double buffers of `len` interleaved `i16` samples each.
    fn start_transfers(
        &mut self,
        output: *mut i16,
        input: *mut i16,
        len: usize,
        source: InputSource,
        sample_rate: u32,
    ) -> Result<(), Self::Error>;

    /// Restart one transfer direction after a reported DMA fault.
    fn restart(&mut self, direction: Direction) -> Result<(), Self::Error>;
}

/// Binary signal line toggled around each half-frame's processing, for
/// oscilloscope latency measurement. Purely observational.
pub trait Indicator {
    fn on(&mut self);
    fn off(&mut self);
}

/// Indicator that drives nothing; the default when no scope line is wired.
pub struct NoIndicator;

impl Indicator for NoIndicator {
    fn on(&mut self) {}
    fn off(&mut self) {}
}

/// Indicator over an `embedded-hal` GPIO output pin.
#[cfg(feature = "gpio")]
pub struct PinIndicator<P>(pub P);

#[cfg(feature = "gpio")]
impl<P: embedded_hal::digital::OutputPin> Indicator for PinIndicator<P> {
    fn on(&mut self) {
        // Pin errors are not actionable mid-frame; the line is diagnostic.
        let _ = self.0.set_high();
    }

    fn off(&mut self) {
        let _ = self.0.set_low();
    }
}

/// Which half a completion interrupt refers to, as reported by HAL-style
/// half/complete callbacks.
///
/// Convenience for ISR glue: the half-transfer callback maps to
/// [`DmaHalf::First`], the full-transfer callback to [`DmaHalf::Second`].
pub fn completed_half(full_transfer: bool) -> DmaHalf {
    if full_transfer {
        DmaHalf::Second
    } else {
        DmaHalf::First
    }
}
