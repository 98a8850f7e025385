//! Double-buffer synchronization between the DMA interrupt and the
//! processing task.
//!
//! The DMA controller fills each transfer buffer in two halves and raises
//! an interrupt at the half-complete and full-complete points. The ISR's
//! only duty is to call [`DoubleBufferSync::notify`] for the finished half
//! and return; the processing task consumes each signal exactly once before
//! processing that half.
//!
//! # Safety Contract
//!
//! - [`notify()`](DoubleBufferSync::notify) is the producer side: lock-free,
//!   allocation-free, never blocks. Safe to call from interrupt context.
//! - [`try_take()`](DoubleBufferSync::try_take) / [`wait()`](DoubleBufferSync::wait)
//!   are the consumer side, called from the single processing task.
//!
//! Each half can only complete once before the other half completes, so a
//! single pending slot per signal suffices: finding a signal already raised
//! means the task missed its deadline for that half. That case is counted
//! (never silently lost) so overruns are observable; the stale-data audio
//! glitch itself is accepted, matching the hardware's behavior.

use core::hint;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Identifies one half of a double-buffered DMA transfer region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmaHalf {
    /// Elements `[0, N/2)`; completion of this half is the HALF signal.
    First,
    /// Elements `[N/2, N)`; completion of this half is the FULL signal.
    Second,
}

impl DmaHalf {
    /// The index range this half occupies within a buffer of `len` elements.
    pub fn range(self, len: usize) -> core::ops::Range<usize> {
        debug_assert!(len % 2 == 0);
        match self {
            DmaHalf::First => 0..len / 2,
            DmaHalf::Second => len / 2..len,
        }
    }

    /// The half that completes after this one.
    pub fn other(self) -> DmaHalf {
        match self {
            DmaHalf::First => DmaHalf::Second,
            DmaHalf::Second => DmaHalf::First,
        }
    }
}

/// A single binary event with overrun accounting.
///
/// `raise` and `take` sides may run in different contexts concurrently.
pub struct EventFlag {
    raised: AtomicBool,
    overruns: AtomicU32,
}

impl EventFlag {
    pub const fn new() -> Self {
        EventFlag {
            raised: AtomicBool::new(false),
            overruns: AtomicU32::new(0),
        }
    }

    /// Raise the event. ISR-safe: lock-free and never blocks.
    ///
    /// If the previous occurrence has not been consumed yet, the event is
    /// coalesced and the overrun counter is incremented.
    pub fn raise(&self) {
        if self.raised.swap(true, Ordering::AcqRel) {
            self.overruns.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Consume the event if it is pending. Returns `true` at most once per
    /// raise.
    pub fn try_take(&self) -> bool {
        self.raised.swap(false, Ordering::AcqRel)
    }

    /// Spin until the event is raised, then consume it.
    ///
    /// On hardware this spin resolves because the DMA interrupt preempts the
    /// processing task; under an RTOS the task body should instead block on
    /// its own signal primitive and use [`try_take`](Self::try_take).
    pub fn wait(&self) {
        while !self.try_take() {
            hint::spin_loop();
        }
    }

    /// Number of times the event was raised while still pending.
    pub fn overrun_count(&self) -> u32 {
        self.overruns.load(Ordering::Relaxed)
    }
}

/// The half/full signal pair for one lockstep capture+playback double buffer.
///
/// `const fn new` so the instance can live in a `static` reachable from both
/// the DMA interrupt and the processing task.
pub struct DoubleBufferSync {
    half: EventFlag,
    full: EventFlag,
}

impl DoubleBufferSync {
    pub const fn new() -> Self {
        DoubleBufferSync {
            half: EventFlag::new(),
            full: EventFlag::new(),
        }
    }

    fn flag(&self, half: DmaHalf) -> &EventFlag {
        match half {
            DmaHalf::First => &self.half,
            DmaHalf::Second => &self.full,
        }
    }

    /// Signal that the DMA finished filling `half`. Call from the transfer
    /// completion ISR and nowhere else.
    pub fn notify(&self, half: DmaHalf) {
        self.flag(half).raise();
    }

    /// Consume the completion signal for `half` if pending.
    pub fn try_take(&self, half: DmaHalf) -> bool {
        self.flag(half).try_take()
    }

    /// Block (spin) until `half` completes, consuming the signal.
    pub fn wait(&self, half: DmaHalf) {
        self.flag(half).wait();
    }

    /// Total deadline overruns observed on either half since startup.
    pub fn overruns(&self) -> u32 {
        self.half.overrun_count() + self.full.overrun_count()
    }
}
