//! Time-window debouncing of button edges.

use crate::registry::Link;
use crate::signal::RequestSlot;
use crate::time::Millis;

/// Result of feeding one edge to the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeOutcome {
    /// The edge was taken as a press and posted as the next request.
    Accepted,
    /// The edge fell inside the debounce window and was discarded.
    Bounced,
}

impl EdgeOutcome {
    #[inline]
    pub fn is_accepted(self) -> bool {
        self == EdgeOutcome::Accepted
    }
}

/// Rejects edges closer than a fixed window to the last accepted edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceFilter {
    window_ms: u32,
}

impl DebounceFilter {
    /// Creates a filter with the given window in milliseconds.
    pub const fn new(window_ms: u32) -> Self {
        Self { window_ms }
    }

    /// The debounce window in milliseconds.
    #[inline]
    pub const fn window_ms(&self) -> u32 {
        self.window_ms
    }

    /// Handles a falling edge on `link`'s button.
    ///
    /// The edge is accepted only if strictly more than the window has passed
    /// since the last accepted edge; an edge exactly on the boundary bounces.
    /// On acceptance the link's timestamp becomes `now` and the link is
    /// posted to `requests`, replacing any unconsumed request.
    ///
    /// Intended for interrupt context.
    pub fn on_edge(&self, link: &Link, now: Millis, requests: &RequestSlot) -> EdgeOutcome {
        let elapsed = now.elapsed_since(link.last_accepted());
        if elapsed <= self.window_ms {
            trace!("edge on {} bounced after {} ms", link.id(), elapsed);
            return EdgeOutcome::Bounced;
        }

        link.set_last_accepted(now);
        requests.request(link.id());
        trace!("edge on {} accepted", link.id());
        EdgeOutcome::Accepted
    }
}

impl Default for DebounceFilter {
    fn default() -> Self {
        Self::new(crate::config::DEBOUNCE_WINDOW_MS)
    }
}
