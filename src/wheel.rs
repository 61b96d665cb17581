//! The steering-wheel main loop.

use crate::arbiter::{BlinkArbiter, BlinkState, Transition};
use crate::can::{CanIngress, DispatchOutcome, FrameDispatcher};
use crate::context::IndicatorContext;
use crate::led::IndicatorLed;
use crate::registry::{INDICATOR_COUNT, IndicatorId};

/// What one loop iteration did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollReport {
    /// `Some` if a tick was consumed and the arbiter advanced.
    pub blink: Option<Transition>,
    /// `Some` if a CAN frame was received and dispatched.
    pub frame: Option<DispatchOutcome>,
}

impl PollReport {
    /// True if neither a tick nor a frame was pending.
    pub fn is_idle(&self) -> bool {
        self.blink.is_none() && self.frame.is_none()
    }
}

/// Loop-side owner of the indicator LEDs and the CAN intake.
///
/// Borrows the shared [`IndicatorContext`] that the interrupt handlers write
/// into. Every check it performs is a zero-timeout poll.
pub struct SteeringWheel<'c, L: IndicatorLed, C: CanIngress> {
    context: &'c IndicatorContext,
    arbiter: BlinkArbiter<L>,
    can: C,
    dispatcher: FrameDispatcher,
}

impl<'c, L: IndicatorLed, C: CanIngress> SteeringWheel<'c, L, C> {
    /// Creates the loop state. All indicator LEDs are turned off.
    ///
    /// `leds` is indexed by [`IndicatorId::index`]: left, hazard, right.
    pub fn new(context: &'c IndicatorContext, leds: [L; INDICATOR_COUNT], can: C) -> Self {
        Self {
            context,
            arbiter: BlinkArbiter::new(leds),
            can,
            dispatcher: FrameDispatcher::new(),
        }
    }

    /// Runs one non-blocking iteration.
    ///
    /// If the tick flag is set it is cleared and the arbiter advances with the
    /// pending request. Then at most one CAN frame is pulled and dispatched.
    pub fn poll(&mut self) -> PollReport {
        let blink = if self.context.take_tick() {
            let next = self.context.take_request();
            Some(self.arbiter.advance(next))
        } else {
            None
        };

        let frame = self
            .can
            .try_receive()
            .map(|frame| self.dispatcher.dispatch(&frame));

        PollReport { blink, frame }
    }

    /// Polls forever.
    pub fn run(&mut self) -> ! {
        info!("steering wheel running");
        loop {
            self.poll();
        }
    }

    /// Returns the current blink state.
    #[inline]
    pub fn state(&self) -> BlinkState {
        self.arbiter.state()
    }

    /// Returns an indicator's LED.
    pub fn led(&self, id: IndicatorId) -> &L {
        self.arbiter.led(id)
    }

    /// Returns the frame dispatcher and its counters.
    pub fn dispatcher(&self) -> &FrameDispatcher {
        &self.dispatcher
    }

    /// Returns the CAN intake.
    pub fn can_mut(&mut self) -> &mut C {
        &mut self.can
    }

    /// Returns the shared context.
    pub fn context(&self) -> &'c IndicatorContext {
        self.context
    }
}
