//! Non-blocking frame intake.

use super::frame::CanFrame;

/// Source of inbound CAN frames.
pub trait CanIngress {
    /// Returns the next queued frame, or `None` right away if there is none.
    ///
    /// Must never block.
    fn try_receive(&mut self) -> Option<CanFrame>;
}

impl<C: CanIngress + ?Sized> CanIngress for &mut C {
    fn try_receive(&mut self) -> Option<CanFrame> {
        (**self).try_receive()
    }
}

/// [`CanIngress`] over any `embedded-can` non-blocking driver.
///
/// `WouldBlock` is the empty-poll outcome. Driver errors (overruns, bus
/// errors) are logged and reported as "no frame".
pub struct NbCanIngress<C: embedded_can::nb::Can> {
    can: C,
    errors: u32,
}

impl<C: embedded_can::nb::Can> NbCanIngress<C> {
    pub fn new(can: C) -> Self {
        Self { can, errors: 0 }
    }

    /// Number of receive errors swallowed so far.
    #[inline]
    pub fn error_count(&self) -> u32 {
        self.errors
    }

    /// Access the underlying driver, e.g. to transmit.
    pub fn inner(&mut self) -> &mut C {
        &mut self.can
    }

    /// Releases the driver.
    pub fn free(self) -> C {
        self.can
    }
}

impl<C: embedded_can::nb::Can> CanIngress for NbCanIngress<C> {
    fn try_receive(&mut self) -> Option<CanFrame> {
        match self.can.receive() {
            Ok(frame) => CanFrame::from_frame(&frame),
            Err(nb::Error::WouldBlock) => None,
            Err(nb::Error::Other(_)) => {
                self.errors = self.errors.wrapping_add(1);
                warn!("CAN receive error ({} so far)", self.errors);
                None
            }
        }
    }
}
