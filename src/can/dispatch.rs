//! Dispatch of inbound frames by identifier.

use core::fmt::Write;

use heapless::String;

use super::frame::{CanFrame, MAX_DATA_LEN};

/// Identifier whose payload is dumped as hex.
pub const HEX_DUMP_ID: u32 = 0x012;

/// Capacity of a hex dump: `0xNN` per byte, space separated.
pub const HEX_DUMP_CAPACITY: usize = MAX_DATA_LEN * 5;

/// Hex rendering of a frame payload, e.g. `0x01 0xab 0xff`.
pub type HexDump = String<HEX_DUMP_CAPACITY>;

/// What the dispatcher did with a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The frame matched [`HEX_DUMP_ID`]; its payload rendered as hex.
    HexDump { id: u32, dump: HexDump },
    /// No handler for this identifier; the frame was dropped.
    Ignored { id: u32 },
}

impl DispatchOutcome {
    /// True if a handler consumed the frame.
    pub fn is_handled(&self) -> bool {
        !matches!(self, DispatchOutcome::Ignored { .. })
    }
}

/// Renders bytes as `0xNN` separated by single spaces.
pub fn hex_dump(data: &[u8]) -> HexDump {
    let mut out = HexDump::new();
    for (i, byte) in data.iter().take(MAX_DATA_LEN).enumerate() {
        if i > 0 {
            out.push(' ').ok();
        }
        // Fits: MAX_DATA_LEN * 4 digits plus separators is below capacity.
        write!(out, "{:#04x}", byte).ok();
    }
    out
}

/// Routes frames to handlers keyed by identifier.
///
/// Identifiers are compared by raw value, so an 11-bit and a 29-bit frame
/// with the same number are treated alike.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameDispatcher {
    dispatched: u32,
    ignored: u32,
}

impl FrameDispatcher {
    pub const fn new() -> Self {
        Self {
            dispatched: 0,
            ignored: 0,
        }
    }

    /// Handles one frame.
    pub fn dispatch(&mut self, frame: &CanFrame) -> DispatchOutcome {
        let id = frame.raw_id();
        match id {
            HEX_DUMP_ID => {
                self.dispatched = self.dispatched.wrapping_add(1);
                let dump = hex_dump(frame.data());
                info!("message with id {=u32:#x}: {=[u8]:#x}", id, frame.data());
                DispatchOutcome::HexDump { id, dump }
            }
            _ => {
                self.ignored = self.ignored.wrapping_add(1);
                trace!("ignoring frame with id {=u32:#x}", id);
                DispatchOutcome::Ignored { id }
            }
        }
    }

    /// Frames consumed by a handler.
    #[inline]
    pub fn dispatched(&self) -> u32 {
        self.dispatched
    }

    /// Frames dropped for lack of a handler.
    #[inline]
    pub fn ignored(&self) -> u32 {
        self.ignored
    }
}
