//! Shared test infrastructure for steering-indicators integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;

use heapless::{Deque, Vec};
use steering_indicators::{
    CanConfig, CanDriver, CanFrame, CanIngress, IndicatorLed, Millis, PeriodicTimer, TimeSource,
};

// ============================================================================
// Mock LED
// ============================================================================

/// Mock LED that records every output write
#[derive(Default)]
pub struct MockLed {
    high: bool,
    history: Vec<bool, 64>,
}

impl MockLed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the output already driven high
    pub fn lit() -> Self {
        Self {
            high: true,
            history: Vec::new(),
        }
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    pub fn history(&self) -> &[bool] {
        &self.history
    }
}

impl IndicatorLed for MockLed {
    fn set_output(&mut self, high: bool) {
        self.high = high;
        let _ = self.history.push(high);
    }

    fn is_output_high(&mut self) -> bool {
        self.high
    }
}

pub fn mock_leds() -> [MockLed; 3] {
    [MockLed::new(), MockLed::new(), MockLed::new()]
}

// ============================================================================
// Mock Clock
// ============================================================================

/// Millisecond clock with controllable time
pub struct MockClock {
    now: Cell<u32>,
}

impl MockClock {
    pub fn new() -> Self {
        Self { now: Cell::new(0) }
    }

    pub fn starting_at(ms: u32) -> Self {
        Self { now: Cell::new(ms) }
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    pub fn set(&self, ms: u32) {
        self.now.set(ms);
    }
}

impl TimeSource for MockClock {
    fn now(&self) -> Millis {
        Millis(self.now.get())
    }
}

// ============================================================================
// Mock CAN
// ============================================================================

/// Queue of inbound frames
#[derive(Default)]
pub struct MockCanBus {
    queue: Deque<CanFrame, 16>,
}

impl MockCanBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: CanFrame) {
        self.queue.push_back(frame).expect("mock bus queue full");
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl CanIngress for MockCanBus {
    fn try_receive(&mut self) -> Option<CanFrame> {
        self.queue.pop_front()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    InstallRejected,
    BusOff,
}

/// CAN driver whose lifecycle steps can be made to fail
#[derive(Default)]
pub struct MockCanDriver {
    pub fail_install: bool,
    pub fail_start: bool,
    pub installed_with: Option<CanConfig>,
    pub started: bool,
}

impl CanDriver for MockCanDriver {
    type Error = DriverError;

    fn install(&mut self, config: &CanConfig) -> Result<(), Self::Error> {
        if self.fail_install {
            return Err(DriverError::InstallRejected);
        }
        self.installed_with = Some(*config);
        Ok(())
    }

    fn start(&mut self) -> Result<(), Self::Error> {
        if self.fail_start {
            return Err(DriverError::BusOff);
        }
        self.started = true;
        Ok(())
    }
}

// ============================================================================
// Mock Timer
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerBusy;

/// Periodic timer that remembers its period
#[derive(Default)]
pub struct MockTimer {
    pub fail: bool,
    pub period_ms: Option<u32>,
}

impl PeriodicTimer for MockTimer {
    type Error = TimerBusy;

    fn start_periodic(&mut self, period_ms: u32) -> Result<(), Self::Error> {
        if self.fail {
            return Err(TimerBusy);
        }
        self.period_ms = Some(period_ms);
        Ok(())
    }

    fn stop(&mut self) {
        self.period_ms = None;
    }
}
