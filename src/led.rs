//! LED output abstraction.
//!
//! Defines the [`IndicatorLed`] trait the arbiter drives, and [`PinLed`], an
//! implementation for any `embedded-hal` stateful output pin.

use embedded_hal::digital::StatefulOutputPin;

/// Trait for abstracting a single on/off indicator LED.
///
/// Implement this for your LED hardware to let the arbiter drive it. Handle
/// hardware errors internally; these methods cannot fail.
pub trait IndicatorLed {
    /// Drives the output HIGH (`true`) or LOW (`false`).
    fn set_output(&mut self, high: bool);

    /// Returns the level the output is currently driven to.
    fn is_output_high(&mut self) -> bool;

    /// Inverts the output: HIGH becomes LOW and LOW becomes HIGH.
    fn toggle(&mut self) {
        let high = self.is_output_high();
        self.set_output(!high);
    }

    /// Forces the output LOW.
    fn force_off(&mut self) {
        self.set_output(false);
    }
}

impl<L: IndicatorLed + ?Sized> IndicatorLed for &mut L {
    fn set_output(&mut self, high: bool) {
        (**self).set_output(high);
    }

    fn is_output_high(&mut self) -> bool {
        (**self).is_output_high()
    }
}

/// Whether the LED lights when its pin is driven high or low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    High,
    Low,
}

/// [`IndicatorLed`] over an `embedded-hal` stateful output pin.
///
/// `set_output(true)` means "lit", translated to the physical level through
/// the configured [`ActiveLevel`]. Pin errors are ignored. The last level
/// written is remembered, so toggling never depends on reading the pin back.
pub struct PinLed<P: StatefulOutputPin> {
    pin: P,
    active: ActiveLevel,
    lit: bool,
}

impl<P: StatefulOutputPin> PinLed<P> {
    /// Wraps a pin and turns the LED off.
    pub fn new(pin: P, active: ActiveLevel) -> Self {
        let mut led = Self {
            pin,
            active,
            lit: false,
        };
        led.set_output(false);
        led
    }

    /// Wraps a pin wired so that HIGH lights the LED.
    pub fn active_high(pin: P) -> Self {
        Self::new(pin, ActiveLevel::High)
    }

    /// Wraps a pin wired so that LOW lights the LED.
    pub fn active_low(pin: P) -> Self {
        Self::new(pin, ActiveLevel::Low)
    }

    /// Releases the pin.
    pub fn free(self) -> P {
        self.pin
    }
}

impl<P: StatefulOutputPin> IndicatorLed for PinLed<P> {
    fn set_output(&mut self, high: bool) {
        self.lit = high;
        let drive_high = match self.active {
            ActiveLevel::High => high,
            ActiveLevel::Low => !high,
        };

        if drive_high {
            self.pin.set_high().ok();
        } else {
            self.pin.set_low().ok();
        }
    }

    fn is_output_high(&mut self) -> bool {
        self.lit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorType, OutputPin};

    struct FakePin {
        high: bool,
    }

    impl ErrorType for FakePin {
        type Error = Infallible;
    }

    impl OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    impl StatefulOutputPin for FakePin {
        fn is_set_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.high)
        }

        fn is_set_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    #[test]
    fn active_high_pin_follows_output() {
        let mut led = PinLed::active_high(FakePin { high: true });
        assert!(!led.is_output_high());

        led.toggle();
        assert!(led.is_output_high());
        assert!(led.free().high);
    }

    /// Pin whose state cannot be read back.
    struct WriteOnlyPin {
        high: bool,
    }

    #[derive(Debug)]
    struct ReadUnsupported;

    impl embedded_hal::digital::Error for ReadUnsupported {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    impl ErrorType for WriteOnlyPin {
        type Error = ReadUnsupported;
    }

    impl OutputPin for WriteOnlyPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    impl StatefulOutputPin for WriteOnlyPin {
        fn is_set_high(&mut self) -> Result<bool, Self::Error> {
            Err(ReadUnsupported)
        }

        fn is_set_low(&mut self) -> Result<bool, Self::Error> {
            Err(ReadUnsupported)
        }
    }

    #[test]
    fn toggle_blinks_when_pin_cannot_be_read() {
        let mut led = PinLed::active_high(WriteOnlyPin { high: true });
        assert!(!led.pin.high);

        let mut levels = [false; 4];
        for level in levels.iter_mut() {
            led.toggle();
            *level = led.pin.high;
        }

        assert_eq!(levels, [true, false, true, false]);
    }

    #[test]
    fn active_low_pin_is_inverted() {
        let mut led = PinLed::active_low(FakePin { high: false });
        assert!(!led.is_output_high());

        led.set_output(true);
        assert!(led.is_output_high());

        led.force_off();
        assert!(!led.is_output_high());
        assert!(led.free().high);
    }
}
