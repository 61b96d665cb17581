//! CAN frame type.

use embedded_can::{ExtendedId, Id, StandardId};
use heapless::Vec;

/// Maximum payload of a classic CAN frame.
pub const MAX_DATA_LEN: usize = 8;

/// A classic CAN 2.0 frame with an 11- or 29-bit identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanFrame {
    id: Id,
    dlc: u8,
    remote: bool,
    data: Vec<u8, MAX_DATA_LEN>,
}

impl CanFrame {
    /// Creates a data frame. Returns `None` if `data` exceeds 8 bytes.
    pub fn new_data(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        let data: Vec<u8, MAX_DATA_LEN> = Vec::from_slice(data).ok()?;
        Some(Self {
            id: id.into(),
            dlc: data.len() as u8,
            remote: false,
            data,
        })
    }

    /// Creates a remote frame requesting `dlc` bytes.
    pub fn new_remote_request(id: impl Into<Id>, dlc: usize) -> Option<Self> {
        if dlc > MAX_DATA_LEN {
            return None;
        }

        Some(Self {
            id: id.into(),
            dlc: dlc as u8,
            remote: true,
            data: Vec::new(),
        })
    }

    /// Creates a standard-id data frame from a raw identifier.
    pub fn standard(raw_id: u16, data: &[u8]) -> Option<Self> {
        Self::new_data(StandardId::new(raw_id)?, data)
    }

    /// Creates an extended-id data frame from a raw identifier.
    pub fn extended(raw_id: u32, data: &[u8]) -> Option<Self> {
        Self::new_data(ExtendedId::new(raw_id)?, data)
    }

    /// Copies any `embedded-can` frame.
    pub fn from_frame<F: embedded_can::Frame>(frame: &F) -> Option<Self> {
        if frame.is_remote_frame() {
            Self::new_remote_request(frame.id(), frame.dlc())
        } else {
            Self::new_data(frame.id(), frame.data())
        }
    }

    /// The identifier.
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// The identifier as a plain number, regardless of width.
    pub fn raw_id(&self) -> u32 {
        match self.id {
            Id::Standard(id) => u32::from(id.as_raw()),
            Id::Extended(id) => id.as_raw(),
        }
    }

    /// True for a 29-bit identifier.
    #[inline]
    pub fn is_extended(&self) -> bool {
        matches!(self.id, Id::Extended(_))
    }

    /// True for a remote transmission request.
    #[inline]
    pub fn is_remote(&self) -> bool {
        self.remote
    }

    /// Data length code.
    #[inline]
    pub fn len(&self) -> u8 {
        self.dlc
    }

    /// True if the data length code is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dlc == 0
    }

    /// Payload bytes. Empty for remote frames.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl embedded_can::Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        Self::new_data(id, data)
    }

    fn new_remote(id: impl Into<Id>, dlc: usize) -> Option<Self> {
        Self::new_remote_request(id, dlc)
    }

    fn is_extended(&self) -> bool {
        CanFrame::is_extended(self)
    }

    fn is_remote_frame(&self) -> bool {
        self.remote
    }

    fn id(&self) -> Id {
        self.id
    }

    fn dlc(&self) -> usize {
        self.dlc as usize
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CanFrame {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "CanFrame(id={=u32:#x}, extended={=bool}, remote={=bool}, data={=[u8]:#x})",
            self.raw_id(),
            self.is_extended(),
            self.remote,
            self.data()
        )
    }
}
