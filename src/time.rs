//! Monotonic millisecond time for debouncing.

use core::cell::Cell;
use critical_section::Mutex;

/// A point on the monotonic millisecond timeline.
///
/// Backed by a `u32` that wraps after ~49.7 days of uptime. All arithmetic is
/// wrapping, so comparisons stay correct across the wrap as long as the two
/// instants are less than half the range apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u32);

impl Millis {
    /// The instant the counter starts from.
    pub const ZERO: Self = Millis(0);

    /// Returns the raw millisecond count.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Milliseconds elapsed since an earlier instant.
    #[inline]
    pub const fn elapsed_since(self, earlier: Millis) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// Returns the instant `ms` milliseconds later.
    #[inline]
    pub const fn wrapping_add(self, ms: u32) -> Self {
        Millis(self.0.wrapping_add(ms))
    }
}

/// Trait for abstracting the monotonic clock.
pub trait TimeSource {
    /// Returns the current time.
    fn now(&self) -> Millis;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Millis {
        (**self).now()
    }
}

/// Millisecond counter advanced from a 1 ms interrupt.
///
/// Can live in a `static` and be shared between the tick interrupt, the
/// button interrupts and the main loop.
pub struct MillisCounter {
    count: Mutex<Cell<u32>>,
}

impl MillisCounter {
    /// Creates a counter starting at zero.
    pub const fn new() -> Self {
        Self {
            count: Mutex::new(Cell::new(0)),
        }
    }

    /// Advances the counter by one millisecond.
    ///
    /// Call from the 1 ms timer interrupt.
    pub fn tick(&self) {
        critical_section::with(|cs| {
            let count = self.count.borrow(cs);
            count.set(count.get().wrapping_add(1));
        });
    }

    /// Advances the counter by `ms` milliseconds.
    pub fn advance(&self, ms: u32) {
        critical_section::with(|cs| {
            let count = self.count.borrow(cs);
            count.set(count.get().wrapping_add(ms));
        });
    }
}

impl Default for MillisCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MillisCounter {
    fn now(&self) -> Millis {
        critical_section::with(|cs| Millis(self.count.borrow(cs).get()))
    }
}
