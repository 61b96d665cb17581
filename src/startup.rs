//! Startup sequence.

use crate::can::{CanConfig, CanDriver, CanSetupError, start_can_bus};
use crate::clock::{BlinkClock, PeriodicTimer};
use crate::config::{BlinkerConfig, ConfigError};
use crate::context::IndicatorContext;
use crate::time::TimeSource;

/// Errors that stop the module from coming up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupError<TE, CE> {
    /// The configuration is unusable.
    Config(ConfigError),
    /// The blink timer failed to start.
    Timer(TE),
    /// The CAN controller failed to come up.
    Can(CanSetupError<CE>),
}

impl<TE, CE> From<ConfigError> for StartupError<TE, CE> {
    fn from(err: ConfigError) -> Self {
        StartupError::Config(err)
    }
}

impl<TE, CE> From<CanSetupError<CE>> for StartupError<TE, CE> {
    fn from(err: CanSetupError<CE>) -> Self {
        StartupError::Can(err)
    }
}

impl<TE: core::fmt::Debug, CE: core::fmt::Debug> core::fmt::Display for StartupError<TE, CE> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StartupError::Config(err) => write!(f, "invalid configuration: {}", err),
            StartupError::Timer(err) => write!(f, "blink timer failed to start: {:?}", err),
            StartupError::Can(err) => write!(f, "{}", err),
        }
    }
}

#[cfg(feature = "std")]
impl<TE: core::fmt::Debug, CE: core::fmt::Debug> std::error::Error for StartupError<TE, CE> {}

/// Brings the module up: validates the configuration, stamps the link
/// timestamps with the current time, starts the blink clock and the CAN bus.
///
/// `blink_clock` and `context` must have been built from `config`; a period
/// or debounce window that differs is rejected as
/// [`StartupError::Config`] before any hardware is touched.
///
/// Every failure is returned to the caller, who decides whether to halt,
/// log or retry. Nothing is retried or rolled back here.
pub fn bring_up<T, D, S>(
    config: &BlinkerConfig,
    context: &IndicatorContext,
    time: &S,
    blink_clock: &mut BlinkClock<T>,
    can: &mut D,
    can_config: &CanConfig,
) -> Result<(), StartupError<T::Error, D::Error>>
where
    T: PeriodicTimer,
    D: CanDriver,
    S: TimeSource,
{
    check_config(config, context, blink_clock)
        .inspect_err(|err| warn!("config rejected: {}", err))?;

    context.registry().stamp_all(time.now());

    blink_clock.start().map_err(|err| {
        warn!("blink timer failed to start");
        StartupError::Timer(err)
    })?;

    start_can_bus(can, can_config).inspect_err(|_| warn!("CAN bring-up failed"))?;

    info!("steering wheel module up");
    Ok(())
}

fn check_config<T: PeriodicTimer>(
    config: &BlinkerConfig,
    context: &IndicatorContext,
    blink_clock: &BlinkClock<T>,
) -> Result<(), ConfigError> {
    config.validate()?;

    if blink_clock.period_ms() != config.blink_period_ms {
        return Err(ConfigError::BlinkPeriodMismatch {
            configured: config.blink_period_ms,
            clock: blink_clock.period_ms(),
        });
    }

    if context.debounce_window_ms() != config.debounce_window_ms {
        return Err(ConfigError::DebounceWindowMismatch {
            configured: config.debounce_window_ms,
            context: context.debounce_window_ms(),
        });
    }

    Ok(())
}
