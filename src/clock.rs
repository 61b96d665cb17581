//! Blink clock: the periodic hardware timer that paces blinking.

/// Trait for abstracting a periodic hardware timer.
///
/// The implementation arranges for its interrupt to call
/// [`IndicatorContext::on_blink_timer`](crate::IndicatorContext::on_blink_timer)
/// once per period.
pub trait PeriodicTimer {
    /// Error reported by the timer driver.
    type Error;

    /// Starts firing every `period_ms` milliseconds.
    fn start_periodic(&mut self, period_ms: u32) -> Result<(), Self::Error>;

    /// Stops the timer.
    fn stop(&mut self);
}

/// Owns the periodic timer and its configured period.
pub struct BlinkClock<T: PeriodicTimer> {
    timer: T,
    period_ms: u32,
    running: bool,
}

impl<T: PeriodicTimer> BlinkClock<T> {
    /// Wraps a timer. Nothing starts until [`start`](Self::start).
    pub fn new(timer: T, period_ms: u32) -> Self {
        Self {
            timer,
            period_ms,
            running: false,
        }
    }

    /// Starts the timer with the configured period.
    pub fn start(&mut self) -> Result<(), T::Error> {
        self.timer.start_periodic(self.period_ms)?;
        self.running = true;
        debug!("blink clock started, period {} ms", self.period_ms);
        Ok(())
    }

    /// Stops the timer.
    pub fn stop(&mut self) {
        self.timer.stop();
        self.running = false;
    }

    /// Returns the blink period in milliseconds.
    #[inline]
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Returns true if the timer has been started and not stopped.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Releases the timer.
    pub fn free(self) -> T {
        self.timer
    }
}
