//! Wrap-around float sample memory for stateful effects.
//!
//! Effects that need history spanning many half-frames (echo, reverb, long
//! FIR tails) index into a scratch region orders of magnitude larger than
//! one half-frame. On the target this is a region of external SDRAM; tests
//! pass in an ordinary buffer.
//!
//! The store itself does no wrap-around arithmetic: positions must stay in
//! `[0, capacity)` and it is the effect's cursor logic that wraps. There is
//! also no locking; the store is owned by the pipeline and lent to the one
//! active effect, which is only ever invoked from the single processing
//! task.

/// Linearly addressed float storage over caller-provided memory.
pub struct ScratchStore<'a> {
    buf: &'a mut [f32],
}

impl<'a> ScratchStore<'a> {
    /// Wrap the given memory and clear it to zero, so stale contents from a
    /// previous run can never leak into the first frames of audio.
    pub fn new(buf: &'a mut [f32]) -> Self {
        buf.fill(0.0);
        ScratchStore { buf }
    }

    /// Number of float samples the store can hold.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Read the sample at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= capacity()`; callers wrap their cursors.
    #[inline(always)]
    pub fn read(&self, pos: usize) -> f32 {
        self.buf[pos]
    }

    /// Write `val` at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= capacity()`; callers wrap their cursors.
    #[inline(always)]
    pub fn write(&mut self, val: f32, pos: usize) {
        self.buf[pos] = val;
    }

    /// Zero the whole region.
    pub fn clear(&mut self) {
        self.buf.fill(0.0);
    }
}
