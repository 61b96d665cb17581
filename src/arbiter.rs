//! Single-blinker arbitration.
//!
//! Provides [`BlinkArbiter`], which owns the indicator LEDs and guarantees at
//! most one of them blinks at a time.

use crate::led::IndicatorLed;
use crate::registry::{INDICATOR_COUNT, IndicatorId};

/// What the indicators are doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkState {
    /// No indicator is blinking. All LEDs are off.
    Idle,
    /// The given indicator is blinking. All other LEDs are off.
    Blinking(IndicatorId),
}

/// How a request was reconciled against the active indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// No request was pending.
    None,
    /// Blinking started from idle.
    Started(IndicatorId),
    /// The active indicator's own button was pressed again; blinking stopped.
    Stopped(IndicatorId),
    /// Another indicator took over; the previous one was forced off.
    Switched {
        from: IndicatorId,
        to: IndicatorId,
    },
}

/// Owns the indicator LEDs and the active slot.
///
/// Runs in loop context only. Each call to [`advance`](Self::advance)
/// reconciles the pending request and then inverts the active LED exactly
/// once, which produces the blink waveform.
pub struct BlinkArbiter<L: IndicatorLed> {
    leds: [L; INDICATOR_COUNT],
    active: Option<IndicatorId>,
}

impl<L: IndicatorLed> BlinkArbiter<L> {
    /// Creates an idle arbiter and turns every LED off.
    ///
    /// `leds` is indexed by [`IndicatorId::index`].
    pub fn new(mut leds: [L; INDICATOR_COUNT]) -> Self {
        for led in leds.iter_mut() {
            led.force_off();
        }

        Self { leds, active: None }
    }

    /// Advances one blink phase.
    ///
    /// `next` is the request read-and-cleared from the request slot.
    pub fn advance(&mut self, next: Option<IndicatorId>) -> Transition {
        let transition = match next {
            None => Transition::None,
            Some(next) if self.active == Some(next) => {
                self.led_mut(next).force_off();
                self.active = None;
                Transition::Stopped(next)
            }
            Some(next) => {
                let transition = match self.active {
                    Some(previous) => {
                        self.led_mut(previous).force_off();
                        Transition::Switched {
                            from: previous,
                            to: next,
                        }
                    }
                    None => Transition::Started(next),
                };
                self.active = Some(next);
                transition
            }
        };

        if transition != Transition::None {
            debug!("blink transition: {}", transition);
        }

        if let Some(active) = self.active {
            self.led_mut(active).toggle();
        }

        transition
    }

    /// Stops any blinking and turns every LED off.
    pub fn reset(&mut self) {
        for led in self.leds.iter_mut() {
            led.force_off();
        }
        self.active = None;
    }

    /// Returns the current state.
    pub fn state(&self) -> BlinkState {
        match self.active {
            Some(id) => BlinkState::Blinking(id),
            None => BlinkState::Idle,
        }
    }

    /// Returns the indicator currently blinking, if any.
    #[inline]
    pub fn active(&self) -> Option<IndicatorId> {
        self.active
    }

    /// Returns a reference to an indicator's LED.
    pub fn led(&self, id: IndicatorId) -> &L {
        &self.leds[id.index()]
    }

    fn led_mut(&mut self, id: IndicatorId) -> &mut L {
        &mut self.leds[id.index()]
    }

    /// Consumes the arbiter and returns the LEDs.
    pub fn into_leds(self) -> [L; INDICATOR_COUNT] {
        self.leds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Bit(bool);

    impl IndicatorLed for Bit {
        fn set_output(&mut self, high: bool) {
            self.0 = high;
        }

        fn is_output_high(&mut self) -> bool {
            self.0
        }
    }

    fn lit(arbiter: &BlinkArbiter<Bit>) -> [bool; INDICATOR_COUNT] {
        IndicatorId::ALL.map(|id| arbiter.led(id).0)
    }

    #[test]
    fn new_turns_all_leds_off() {
        let arbiter = BlinkArbiter::new([Bit(true), Bit(true), Bit(false)]);
        assert_eq!(lit(&arbiter), [false, false, false]);
        assert_eq!(arbiter.state(), BlinkState::Idle);
    }

    #[test]
    fn idle_without_request_does_nothing() {
        let mut arbiter = BlinkArbiter::new([Bit::default(), Bit::default(), Bit::default()]);
        assert_eq!(arbiter.advance(None), Transition::None);
        assert_eq!(lit(&arbiter), [false, false, false]);
    }

    #[test]
    fn hazard_start_stop() {
        let mut arbiter = BlinkArbiter::new([Bit::default(), Bit::default(), Bit::default()]);

        assert_eq!(
            arbiter.advance(Some(IndicatorId::Hazard)),
            Transition::Started(IndicatorId::Hazard)
        );
        assert_eq!(lit(&arbiter), [false, true, false]);

        assert_eq!(
            arbiter.advance(Some(IndicatorId::Hazard)),
            Transition::Stopped(IndicatorId::Hazard)
        );
        assert_eq!(lit(&arbiter), [false, false, false]);
        assert_eq!(arbiter.active(), None);
    }

    #[test]
    fn reset_clears_active() {
        let mut arbiter = BlinkArbiter::new([Bit::default(), Bit::default(), Bit::default()]);
        arbiter.advance(Some(IndicatorId::Left));
        arbiter.reset();
        assert_eq!(arbiter.state(), BlinkState::Idle);
        assert_eq!(lit(&arbiter), [false, false, false]);
    }
}
