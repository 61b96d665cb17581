#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`IndicatorContext`**: Process-wide state written by interrupts (link table, request slot, tick flag)
//! - **`IndicatorId`** / **`Link`**: One button paired with one LED (left, hazard, right)
//! - **`DebounceFilter`**: Accepts a button edge only if more than the debounce window has passed
//! - **`BlinkArbiter`**: Owns the LEDs; at most one indicator blinks, pressing it again stops it
//! - **`BlinkClock`** / **`PeriodicTimer`**: The periodic timer whose interrupt sets the tick flag
//! - **`SteeringWheel`**: The non-blocking main loop (tick → arbiter, CAN frame → dispatcher)
//! - **`IndicatorLed`**: Trait to implement for your LED hardware
//! - **`TimeSource`**: Trait to implement for your millisecond clock
//! - **`CanIngress`** / **`CanDriver`**: Traits to implement for your CAN controller
//!
//! Interrupt handlers only call `IndicatorContext::on_button_edge` and
//! `IndicatorContext::on_blink_timer`; everything else runs in the main loop.

#[macro_use]
mod fmt;

pub mod arbiter;
pub mod can;
pub mod clock;
pub mod config;
pub mod context;
pub mod debounce;
pub mod led;
pub mod registry;
pub mod signal;
pub mod startup;
pub mod time;
pub mod wheel;

pub use arbiter::{BlinkArbiter, BlinkState, Transition};
pub use can::{
    CanConfig, CanDriver, CanFilter, CanFrame, CanIngress, CanMode, CanSetupError,
    DispatchOutcome, FrameDispatcher, NbCanIngress, start_can_bus,
};
pub use clock::{BlinkClock, PeriodicTimer};
pub use config::{BLINK_PERIOD_MS, BlinkerConfig, BoardPins, ConfigError, DEBOUNCE_WINDOW_MS};
pub use context::IndicatorContext;
pub use debounce::{DebounceFilter, EdgeOutcome};
pub use led::{ActiveLevel, IndicatorLed, PinLed};
pub use registry::{INDICATOR_COUNT, IndicatorId, IndicatorRegistry, Link};
pub use signal::{RequestSlot, TickFlag};
pub use startup::{StartupError, bring_up};
pub use time::{Millis, MillisCounter, TimeSource};
pub use wheel::{PollReport, SteeringWheel};
