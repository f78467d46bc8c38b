//! Status indicator trait for the mapper's RGB LED.

/// Phase of a mapping cycle, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MapperStatus {
    Off,
    /// Waiting for a position.
    Acquiring,
    /// Position found, payload about to be sent.
    PositionFound,
    /// Acquisition timed out.
    PositionNotFound,
}

impl MapperStatus {
    /// LED colour as `0xRRGGBB`.
    #[must_use]
    pub const fn rgb(self) -> u32 {
        match self {
            Self::Off => 0x00_00_00,
            Self::Acquiring => 0x40_30_00,
            Self::PositionFound => 0x00_40_00,
            Self::PositionNotFound => 0x40_00_00,
        }
    }
}

/// Something that can display a [`MapperStatus`], usually an RGB LED.
pub trait StatusIndicator {
    fn show(&mut self, status: MapperStatus);
}

impl<T: StatusIndicator + ?Sized> StatusIndicator for &mut T {
    #[inline]
    fn show(&mut self, status: MapperStatus) {
        T::show(self, status);
    }
}

/// Indicator that discards every status.
///
/// Use this on boards without an LED.
pub struct NullIndicator;

impl StatusIndicator for NullIndicator {
    fn show(&mut self, _status: MapperStatus) {}
}
