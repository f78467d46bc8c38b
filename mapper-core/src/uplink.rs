//! Uplink trait and error types.

use core::fmt;

/// Error type for uplink transmissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UplinkError {
    /// The node has not joined the network yet.
    NotJoined,
    /// The radio is still busy with a previous transmission.
    Busy,
    /// Radio or driver I/O error.
    Io,
}

impl fmt::Display for UplinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotJoined => write!(f, "network not joined"),
            Self::Busy => write!(f, "radio busy"),
            Self::Io => write!(f, "uplink I/O error"),
        }
    }
}

/// Radio transmit capability.
///
/// Implementations wrap an already joined LoRaWAN socket or equivalent. The
/// payload is sent unconfirmed; the return value is the number of bytes the
/// radio accepted.
pub trait Uplink {
    fn send(&mut self, payload: &[u8]) -> Result<usize, UplinkError>;
}

impl<T: Uplink + ?Sized> Uplink for &mut T {
    #[inline]
    fn send(&mut self, payload: &[u8]) -> Result<usize, UplinkError> {
        T::send(self, payload)
    }
}
