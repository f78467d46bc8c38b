//! Bus read capability and its error type.

use core::fmt;

/// Error reading from the GNSS bus.
///
/// Bus errors end the current acquisition attempt; the caller's next
/// scheduled cycle is the retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Generic I/O failure.
    Io,
    /// Device did not acknowledge its address.
    NoAcknowledge,
    /// Lost arbitration on a shared bus.
    ArbitrationLoss,
    /// Data was lost because it was not read in time.
    Overrun,
    /// Serial framing error.
    Framing,
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "bus I/O error"),
            Self::NoAcknowledge => write!(f, "device did not acknowledge"),
            Self::ArbitrationLoss => write!(f, "bus arbitration lost"),
            Self::Overrun => write!(f, "receive overrun"),
            Self::Framing => write!(f, "framing error"),
        }
    }
}

/// Byte source connected to the GNSS receiver.
///
/// The device address, if any, is bound inside the implementation. Reads
/// must return within a bounded time; the acquirer's deadline is only
/// checked between reads.
pub trait GnssBus {
    /// Read up to `buf.len()` bytes, returning how many were written.
    ///
    /// Returning 0 means nothing was available.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BusError>;
}

impl<T: GnssBus + ?Sized> GnssBus for &mut T {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BusError> {
        T::read(self, buf)
    }
}
