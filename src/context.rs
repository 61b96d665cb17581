//! Process-wide state shared between interrupt handlers and the main loop.

use crate::config::BlinkerConfig;
use crate::debounce::{DebounceFilter, EdgeOutcome};
use crate::registry::{IndicatorId, IndicatorRegistry};
use crate::signal::{RequestSlot, TickFlag};
use crate::time::Millis;

/// The shared indicator context.
///
/// Built once at startup, usually in a `static`, and passed by reference to
/// the button interrupts, the blink timer interrupt and the main loop. It
/// holds the link table, the request slot and the tick flag; the active
/// indicator lives in the loop-owned [`BlinkArbiter`](crate::BlinkArbiter).
///
/// ```
/// use steering_indicators::{BlinkerConfig, IndicatorContext, IndicatorId, Millis};
///
/// static CONTEXT: IndicatorContext = IndicatorContext::new(BlinkerConfig::DEFAULT);
///
/// // From the left button's falling-edge interrupt:
/// CONTEXT.on_button_edge(IndicatorId::Left, Millis(1_000));
/// // From the blink timer interrupt:
/// CONTEXT.on_blink_timer();
///
/// assert!(CONTEXT.take_tick());
/// assert_eq!(CONTEXT.take_request(), Some(IndicatorId::Left));
/// ```
#[derive(Debug)]
pub struct IndicatorContext {
    registry: IndicatorRegistry,
    filter: DebounceFilter,
    requests: RequestSlot,
    tick: TickFlag,
}

impl IndicatorContext {
    /// Creates the context from a configuration.
    pub const fn new(config: BlinkerConfig) -> Self {
        Self {
            registry: IndicatorRegistry::new(&config.pins),
            filter: DebounceFilter::new(config.debounce_window_ms),
            requests: RequestSlot::new(),
            tick: TickFlag::new(),
        }
    }

    /// Falling-edge handler for an indicator button.
    pub fn on_button_edge(&self, id: IndicatorId, now: Millis) -> EdgeOutcome {
        self.filter
            .on_edge(self.registry.link(id), now, &self.requests)
    }

    /// Falling-edge handler keyed by GPIO number.
    ///
    /// Returns `None` if the pin is not an indicator button.
    pub fn on_button_pin(&self, pin: u8, now: Millis) -> Option<EdgeOutcome> {
        let id = self.registry.find_by_button(pin)?;
        Some(self.on_button_edge(id, now))
    }

    /// Blink timer handler. Sets the tick flag.
    ///
    /// Returns `true` if the previous tick had not been consumed yet, in which
    /// case the two are coalesced into one.
    pub fn on_blink_timer(&self) -> bool {
        let coalesced = self.tick.signal();
        if coalesced {
            trace!("blink tick coalesced");
        }
        coalesced
    }

    /// Tests and clears the tick flag. Never blocks.
    #[inline]
    pub fn take_tick(&self) -> bool {
        self.tick.take()
    }

    /// Reads and clears the pending indicator request.
    #[inline]
    pub fn take_request(&self) -> Option<IndicatorId> {
        self.requests.take()
    }

    /// Returns the pending request without consuming it.
    #[inline]
    pub fn pending_request(&self) -> Option<IndicatorId> {
        self.requests.peek()
    }

    /// Returns the link table.
    #[inline]
    pub fn registry(&self) -> &IndicatorRegistry {
        &self.registry
    }

    /// Returns the debounce window in milliseconds.
    #[inline]
    pub fn debounce_window_ms(&self) -> u32 {
        self.filter.window_ms()
    }
}

impl Default for IndicatorContext {
    fn default() -> Self {
        Self::new(BlinkerConfig::DEFAULT)
    }
}
