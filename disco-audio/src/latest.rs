//! Single-slot "latest value" channel for fire-and-forget handoff to the
//! display task.
//!
//! The processing task publishes a fresh level report or spectrum frame each
//! time one is produced; the display task polls at its own pace. There is no
//! backpressure: overwriting a value the display never consumed is
//! acceptable, only the newest value matters.
//!
//! # Safety Contract
//!
//! - Only ONE context may call [`publish()`](LatestSlot::publish) (the
//!   processing task).
//! - Only ONE context may call [`take()`](LatestSlot::take) (the display
//!   task). The two may preempt each other.
//!
//! A sequence counter (even = stable, odd = write in progress) lets the
//! reader detect and retry torn reads instead of locking the writer out.

use core::cell::UnsafeCell;
use core::mem::MaybeUninit;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Lock-free single-producer single-consumer mailbox holding the most
/// recently published value.
pub struct LatestSlot<T> {
    value: UnsafeCell<MaybeUninit<T>>,
    /// Incremented to odd before a write, back to even after.
    seq: AtomicUsize,
    /// Set on publish, cleared on take.
    fresh: AtomicBool,
}

// SAFETY: T: Send is required because values cross context boundaries.
// The single-producer/single-consumer contract plus the sequence counter
// (readers discard values copied while `seq` was odd or changed mid-read)
// keeps access to the slot sound.
unsafe impl<T: Send> Sync for LatestSlot<T> {}
unsafe impl<T: Send> Send for LatestSlot<T> {}

impl<T: Copy> LatestSlot<T> {
    pub const fn new() -> Self {
        LatestSlot {
            value: UnsafeCell::new(MaybeUninit::uninit()),
            seq: AtomicUsize::new(0),
            fresh: AtomicBool::new(false),
        }
    }

    /// Publish a new value, replacing any unconsumed previous one.
    ///
    /// Producer side only. Lock-free, never blocks.
    pub fn publish(&self, value: T) {
        // Odd sequence marks the write window; Acquire/Release pairs with
        // the reader's loads.
        self.seq.fetch_add(1, Ordering::AcqRel);
        // SAFETY: we are the sole producer, so no other write can overlap;
        // concurrent readers see the odd sequence and retry.
        unsafe {
            (*self.value.get()).write(value);
        }
        self.seq.fetch_add(1, Ordering::AcqRel);
        self.fresh.store(true, Ordering::Release);
    }

    /// Take the latest value if one was published since the last take.
    ///
    /// Consumer side only. Returns `None` when nothing new is available.
    pub fn take(&self) -> Option<T> {
        if !self.fresh.swap(false, Ordering::AcqRel) {
            return None;
        }
        Some(self.read())
    }

    /// Read the latest value without consuming the freshness marker.
    ///
    /// Must only be called after at least one publish, which `take`
    /// guarantees via the `fresh` flag.
    fn read(&self) -> T {
        loop {
            let before = self.seq.load(Ordering::Acquire);
            if before % 2 == 1 {
                // Write in progress, retry.
                core::hint::spin_loop();
                continue;
            }
            // SAFETY: `fresh` was set, so the slot has been initialized by a
            // completed publish. The copy may race a new write; the sequence
            // recheck below discards such torn reads.
            let value = unsafe { (*self.value.get()).assume_init_read() };
            if self.seq.load(Ordering::Acquire) == before {
                return value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_yields_none() {
        let slot: LatestSlot<u32> = LatestSlot::new();
        assert_eq!(slot.take(), None);
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn take_consumes_freshness() {
        let slot = LatestSlot::new();
        slot.publish(7u32);
        assert_eq!(slot.take(), Some(7));
        assert_eq!(slot.take(), None, "value already consumed");
    }

    #[test]
    fn newest_value_wins() {
        let slot = LatestSlot::new();
        slot.publish(1u32);
        slot.publish(2);
        slot.publish(3);
        assert_eq!(slot.take(), Some(3));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn republish_after_take() {
        let slot = LatestSlot::new();
        slot.publish([1.0f32, 2.0]);
        assert_eq!(slot.take(), Some([1.0, 2.0]));
        slot.publish([3.0, 4.0]);
        assert_eq!(slot.take(), Some([3.0, 4.0]));
    }
}
