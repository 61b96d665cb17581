//! CAN controller configuration and bring-up.

use embedded_can::{ExtendedId, Id, StandardId};

/// Node identifier of the steering-wheel module.
pub const OWN_CAN_ID: u16 = 0x37A3;

/// Nominal bus bitrate.
pub const CAN_BITRATE: u32 = 500_000;

/// Controller TX pin.
pub const CAN_TX_PIN: u8 = 22;

/// Controller RX pin.
pub const CAN_RX_PIN: u8 = 23;

/// Controller operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CanMode {
    /// Transmits, receives and acknowledges.
    #[default]
    Normal,
    /// Transmits without requiring acknowledgement (self-test).
    NoAck,
    /// Receives only; never drives the bus.
    ListenOnly,
}

/// Acceptance filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CanFilter {
    /// Accept every frame.
    #[default]
    AcceptAll,
    /// Accept frames whose identifier matches `id` on the bits set in `mask`.
    Mask { id: u32, mask: u32, extended: bool },
}

impl CanFilter {
    /// Returns true if a frame with this identifier passes the filter.
    pub fn accepts(&self, id: Id) -> bool {
        match *self {
            CanFilter::AcceptAll => true,
            CanFilter::Mask { id: want, mask, extended } => {
                let (raw, is_extended) = match id {
                    Id::Standard(id) => (u32::from(id.as_raw()), false),
                    Id::Extended(id) => (id.as_raw(), true),
                };
                is_extended == extended && (raw & mask) == (want & mask)
            }
        }
    }
}

/// Everything a driver needs to bring the CAN controller up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CanConfig {
    pub bitrate: u32,
    pub mode: CanMode,
    pub filter: CanFilter,
    pub tx_pin: u8,
    pub rx_pin: u8,
    /// Raise a driver alert whenever a frame is received.
    pub rx_alerts: bool,
    /// Our own node identifier.
    pub own_id: u16,
}

impl CanConfig {
    /// 500 kbit/s, normal mode, accept-all, TX 22 / RX 23.
    pub const DEFAULT: Self = Self {
        bitrate: CAN_BITRATE,
        mode: CanMode::Normal,
        filter: CanFilter::AcceptAll,
        tx_pin: CAN_TX_PIN,
        rx_pin: CAN_RX_PIN,
        rx_alerts: true,
        own_id: OWN_CAN_ID,
    };

    /// Sets the operating mode.
    pub const fn with_mode(mut self, mode: CanMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the acceptance filter.
    pub const fn with_filter(mut self, filter: CanFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Our node identifier on the bus.
    ///
    /// Values that fit 11 bits use a standard identifier; wider values (the
    /// default `0x37A3` among them) need the extended format.
    pub fn own_id(&self) -> Id {
        StandardId::new(self.own_id)
            .map_or_else(|| Id::Extended(widen(self.own_id)), Id::Standard)
    }
}

/// Every `u16` fits the 29-bit extended range.
const fn widen(raw: u16) -> ExtendedId {
    // SAFETY: u16::MAX (0xFFFF) is below ExtendedId::MAX (0x1FFF_FFFF).
    unsafe { ExtendedId::new_unchecked(raw as u32) }
}

impl Default for CanConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Trait for abstracting the CAN controller driver's lifecycle.
///
/// Implement this over the board's driver (e.g. the ESP32 TWAI driver).
pub trait CanDriver {
    /// Error reported by the driver.
    type Error;

    /// Installs the driver with timing, filter and mode settings.
    fn install(&mut self, config: &CanConfig) -> Result<(), Self::Error>;

    /// Starts bus participation.
    fn start(&mut self) -> Result<(), Self::Error>;
}

/// Errors from bringing the CAN controller up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CanSetupError<E> {
    /// Driver installation failed.
    Install(E),
    /// The bus could not be started.
    Start(E),
}

impl<E: core::fmt::Debug> core::fmt::Display for CanSetupError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CanSetupError::Install(err) => write!(f, "CAN driver install failed: {:?}", err),
            CanSetupError::Start(err) => write!(f, "CAN bus start failed: {:?}", err),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for CanSetupError<E> {}

/// Installs and starts the CAN driver.
///
/// Stops at the first failure and returns it; there is no retry.
pub fn start_can_bus<D: CanDriver>(
    driver: &mut D,
    config: &CanConfig,
) -> Result<(), CanSetupError<D::Error>> {
    driver.install(config).map_err(CanSetupError::Install)?;
    driver.start().map_err(CanSetupError::Start)?;
    info!("CAN bus up at {} bit/s", config.bitrate);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_own_id_is_extended() {
        let id = CanConfig::DEFAULT.own_id();
        assert_eq!(id, Id::Extended(ExtendedId::new(0x37A3).unwrap()));
    }

    #[test]
    fn small_own_id_is_standard() {
        let config = CanConfig {
            own_id: 0x123,
            ..CanConfig::DEFAULT
        };
        assert_eq!(config.own_id(), Id::Standard(StandardId::new(0x123).unwrap()));
    }

    #[test]
    fn ids_above_eleven_bits_widen_to_extended() {
        for raw in [0x800u16, u16::MAX] {
            let config = CanConfig {
                own_id: raw,
                ..CanConfig::DEFAULT
            };
            assert_eq!(
                config.own_id(),
                Id::Extended(ExtendedId::new(u32::from(raw)).unwrap())
            );
        }
    }

    #[test]
    fn mask_filter() {
        let filter = CanFilter::Mask {
            id: 0x010,
            mask: 0x7F0,
            extended: false,
        };
        assert!(filter.accepts(StandardId::new(0x012).unwrap().into()));
        assert!(!filter.accepts(StandardId::new(0x022).unwrap().into()));
        assert!(!filter.accepts(ExtendedId::new(0x012).unwrap().into()));
        assert!(CanFilter::AcceptAll.accepts(ExtendedId::new(0x1FFF_FFFF).unwrap().into()));
    }
}
