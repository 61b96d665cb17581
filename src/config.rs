//! Compile-time configuration and board pin map.

/// Minimum spacing between two accepted edges on the same button.
///
/// The steering-wheel buttons bounce badly; an edge arriving this many
/// milliseconds or fewer after the last accepted one is discarded.
pub const DEBOUNCE_WINDOW_MS: u32 = 150;

/// Period of the blink clock in milliseconds (one LED toggle per tick).
pub const BLINK_PERIOD_MS: u32 = 500;

/// GPIO assignment for the indicator buttons and LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardPins {
    pub left_button: u8,
    pub hazard_button: u8,
    pub right_button: u8,
    pub left_led: u8,
    pub hazard_led: u8,
    pub right_led: u8,
    /// Battery-warning LED. Configured as an output but never driven by the
    /// indicator logic.
    pub battery_led: u8,
}

impl BoardPins {
    /// Pin map of the ESP32-WROOM-32E steering-wheel board.
    pub const STEERING_WHEEL: Self = Self {
        left_button: 16,
        hazard_button: 4,
        right_button: 0,
        left_led: 25,
        hazard_led: 26,
        right_led: 27,
        battery_led: 33,
    };

    /// All assigned pins, buttons first.
    pub const fn all(&self) -> [u8; 7] {
        [
            self.left_button,
            self.hazard_button,
            self.right_button,
            self.left_led,
            self.hazard_led,
            self.right_led,
            self.battery_led,
        ]
    }

    /// Returns the first pin that is assigned to more than one role.
    pub fn first_duplicate(&self) -> Option<u8> {
        let pins = self.all();
        pins.iter()
            .enumerate()
            .find(|&(i, pin)| pins[i + 1..].contains(pin))
            .map(|(_, &pin)| pin)
    }
}

impl Default for BoardPins {
    fn default() -> Self {
        Self::STEERING_WHEEL
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The blink clock cannot run with a zero period.
    ZeroBlinkPeriod,

    /// The same GPIO is assigned to two roles.
    DuplicatePin(u8),

    /// The blink clock was built with a period other than the configured one.
    BlinkPeriodMismatch { configured: u32, clock: u32 },

    /// The context was built with a debounce window other than the
    /// configured one.
    DebounceWindowMismatch { configured: u32, context: u32 },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroBlinkPeriod => write!(f, "blink period must be non-zero"),
            ConfigError::DuplicatePin(pin) => {
                write!(f, "GPIO {} is assigned to more than one role", pin)
            }
            ConfigError::BlinkPeriodMismatch { configured, clock } => write!(
                f,
                "blink clock runs at {} ms but {} ms is configured",
                clock, configured
            ),
            ConfigError::DebounceWindowMismatch {
                configured,
                context,
            } => write!(
                f,
                "debounce window is {} ms but {} ms is configured",
                context, configured
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Timing and wiring of the indicator core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkerConfig {
    /// Debounce window in milliseconds (strict greater-than comparison).
    pub debounce_window_ms: u32,

    /// Blink clock period in milliseconds.
    pub blink_period_ms: u32,

    /// Board pin map.
    pub pins: BoardPins,
}

impl BlinkerConfig {
    /// Reference configuration of the steering-wheel module.
    pub const DEFAULT: Self = Self {
        debounce_window_ms: DEBOUNCE_WINDOW_MS,
        blink_period_ms: BLINK_PERIOD_MS,
        pins: BoardPins::STEERING_WHEEL,
    };

    /// Sets the debounce window.
    pub const fn with_debounce_window(mut self, ms: u32) -> Self {
        self.debounce_window_ms = ms;
        self
    }

    /// Sets the blink period.
    pub const fn with_blink_period(mut self, ms: u32) -> Self {
        self.blink_period_ms = ms;
        self
    }

    /// Sets the pin map.
    pub const fn with_pins(mut self, pins: BoardPins) -> Self {
        self.pins = pins;
        self
    }

    /// Checks the configuration for values the hardware cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.blink_period_ms == 0 {
            return Err(ConfigError::ZeroBlinkPeriod);
        }

        if let Some(pin) = self.pins.first_duplicate() {
            return Err(ConfigError::DuplicatePin(pin));
        }

        Ok(())
    }
}

impl Default for BlinkerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
