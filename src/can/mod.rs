//! CAN bus collaborator.
//!
//! The indicator core only needs a non-blocking way to pull inbound frames
//! ([`CanIngress`]) and a place to hand them to ([`FrameDispatcher`]).
//! [`start_can_bus`] brings the controller up and reports failures to the
//! caller.

pub mod dispatch;
pub mod frame;
pub mod ingress;
pub mod setup;

pub use dispatch::{DispatchOutcome, FrameDispatcher, HEX_DUMP_ID, HexDump, hex_dump};
pub use frame::{CanFrame, MAX_DATA_LEN};
pub use ingress::{CanIngress, NbCanIngress};
pub use setup::{
    CAN_BITRATE, CanConfig, CanDriver, CanFilter, CanMode, CanSetupError, OWN_CAN_ID,
    start_can_bus,
};
