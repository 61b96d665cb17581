//! Indicator registry: the fixed set of button → LED links.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::config::BoardPins;
use crate::time::Millis;

/// Number of indicators on the steering wheel.
pub const INDICATOR_COUNT: usize = 3;

/// Identifies one indicator (a button paired with its LED).
///
/// Doubles as the index into the registry and into the arbiter's LED array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorId {
    Left = 0,
    Hazard = 1,
    Right = 2,
}

impl IndicatorId {
    /// All indicators in index order.
    pub const ALL: [IndicatorId; INDICATOR_COUNT] =
        [IndicatorId::Left, IndicatorId::Hazard, IndicatorId::Right];

    /// Returns the table index of this indicator.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the indicator stored at `index`, if any.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(IndicatorId::Left),
            1 => Some(IndicatorId::Hazard),
            2 => Some(IndicatorId::Right),
            _ => None,
        }
    }
}

/// A button/LED pair with the timestamp of its last accepted edge.
///
/// Identity is fixed for the process lifetime. The timestamp is written only
/// by the debounce filter from the button's interrupt.
#[derive(Debug)]
pub struct Link {
    id: IndicatorId,
    button_pin: u8,
    led_pin: u8,
    last_accepted: AtomicU32,
}

impl Link {
    /// Creates a link whose last accepted edge is at time zero.
    pub const fn new(id: IndicatorId, button_pin: u8, led_pin: u8) -> Self {
        Self {
            id,
            button_pin,
            led_pin,
            last_accepted: AtomicU32::new(0),
        }
    }

    #[inline]
    pub fn id(&self) -> IndicatorId {
        self.id
    }

    #[inline]
    pub fn button_pin(&self) -> u8 {
        self.button_pin
    }

    #[inline]
    pub fn led_pin(&self) -> u8 {
        self.led_pin
    }

    /// Time of the last accepted edge.
    #[inline]
    pub fn last_accepted(&self) -> Millis {
        Millis(self.last_accepted.load(Ordering::Relaxed))
    }

    pub(crate) fn set_last_accepted(&self, at: Millis) {
        self.last_accepted.store(at.as_u32(), Ordering::Relaxed);
    }
}

/// The static table of indicator links.
///
/// Built once at startup; only the per-link timestamps change afterwards.
#[derive(Debug)]
pub struct IndicatorRegistry {
    links: [Link; INDICATOR_COUNT],
}

impl IndicatorRegistry {
    /// Builds the registry from a board pin map.
    pub const fn new(pins: &BoardPins) -> Self {
        Self {
            links: [
                Link::new(IndicatorId::Left, pins.left_button, pins.left_led),
                Link::new(IndicatorId::Hazard, pins.hazard_button, pins.hazard_led),
                Link::new(IndicatorId::Right, pins.right_button, pins.right_led),
            ],
        }
    }

    /// Returns the link for an indicator.
    #[inline]
    pub fn link(&self, id: IndicatorId) -> &Link {
        &self.links[id.index()]
    }

    /// Finds the indicator wired to a button GPIO.
    ///
    /// Lets a shared GPIO interrupt vector map the firing pin to a typed link.
    pub fn find_by_button(&self, pin: u8) -> Option<IndicatorId> {
        self.links
            .iter()
            .find(|link| link.button_pin == pin)
            .map(Link::id)
    }

    /// Iterates over all links in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    /// Stamps every link with `now`, so edges within one debounce window of
    /// startup are rejected.
    pub fn stamp_all(&self, now: Millis) {
        for link in &self.links {
            link.set_last_accepted(now);
        }
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::new(&BoardPins::STEERING_WHEEL)
    }
}
