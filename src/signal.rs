//! Single-slot signals shared between interrupt and loop context.
//!
//! Interrupt handlers only ever store into these slots. The loop side reads
//! and clears inside a critical section, so a store from an interrupt cannot
//! land between the read and the clear and get lost. Neither slot counts:
//! a second store before the loop consumes the first overwrites it.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::registry::IndicatorId;

const EMPTY: u8 = u8::MAX;

/// The most recently accepted, not yet reconciled, indicator request.
///
/// Holds an index into the indicator registry, or nothing. Last write wins.
#[derive(Debug)]
pub struct RequestSlot {
    slot: AtomicU8,
}

impl RequestSlot {
    /// Creates an empty slot.
    pub const fn new() -> Self {
        Self {
            slot: AtomicU8::new(EMPTY),
        }
    }

    /// Records a request, replacing any unconsumed one.
    ///
    /// Safe to call from interrupt context.
    #[inline]
    pub fn request(&self, id: IndicatorId) {
        self.slot.store(id.index() as u8, Ordering::Release);
    }

    /// Reads and clears the pending request.
    pub fn take(&self) -> Option<IndicatorId> {
        let raw = critical_section::with(|_| {
            let raw = self.slot.load(Ordering::Acquire);
            self.slot.store(EMPTY, Ordering::Relaxed);
            raw
        });
        IndicatorId::from_index(raw as usize)
    }

    /// Returns the pending request without clearing it.
    pub fn peek(&self) -> Option<IndicatorId> {
        IndicatorId::from_index(self.slot.load(Ordering::Acquire) as usize)
    }
}

impl Default for RequestSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Binary tick flag set by the blink clock interrupt.
#[derive(Debug)]
pub struct TickFlag {
    pending: AtomicBool,
}

impl TickFlag {
    /// Creates a cleared flag.
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Sets the flag. Returns `true` if a previous tick was still pending
    /// and this one was therefore coalesced into it.
    ///
    /// Safe to call from interrupt context.
    #[inline]
    pub fn signal(&self) -> bool {
        let was_pending = self.pending.load(Ordering::Relaxed);
        self.pending.store(true, Ordering::Release);
        was_pending
    }

    /// Tests and clears the flag without blocking.
    pub fn take(&self) -> bool {
        critical_section::with(|_| {
            let was_set = self.pending.load(Ordering::Acquire);
            self.pending.store(false, Ordering::Relaxed);
            was_set
        })
    }

    /// Returns whether a tick is pending, leaving it in place.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

impl Default for TickFlag {
    fn default() -> Self {
        Self::new()
    }
}
