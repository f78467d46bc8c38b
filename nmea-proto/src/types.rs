//! Position fix accumulator and UTC timestamp.

use core::fmt;

/// UTC time of day as reported by the receiver (`hhmmss.ss`).
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp {
    pub hour: u8,
    pub minute: u8,
    pub second: f32,
}

impl Timestamp {
    /// Midnight, used before any sentence carried a time.
    pub const ZERO: Self = Self {
        hour: 0,
        minute: 0,
        second: 0.0,
    };

    #[must_use]
    pub const fn new(hour: u8, minute: u8, second: f32) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }
}

/// Latest known position and quality values.
///
/// Each sentence kind updates its own subset of fields; nothing is cleared
/// between sentences. The fix is usable once both a latitude and a dilution
/// of precision have been seen, see [`PositionFix::is_usable`].
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionFix {
    /// Signed degrees, south is negative.
    pub latitude: f64,
    /// Signed degrees, west is negative.
    pub longitude: f64,
    /// Meters above mean sea level.
    pub altitude: f64,
    /// Horizontal dilution of precision.
    pub horizontal_dilution: f64,
    /// GGA fix quality code, 0 means no fix.
    pub fix_quality: u8,
    pub satellites_in_use: u8,
    pub timestamp: Timestamp,
}

impl PositionFix {
    /// A fix with every field at its default.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            altitude: 0.0,
            horizontal_dilution: 0.0,
            fix_quality: 0,
            satellites_in_use: 0,
            timestamp: Timestamp::ZERO,
        }
    }

    /// True once a latitude and a horizontal dilution have both been parsed.
    #[inline]
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.latitude != 0.0 && self.horizontal_dilution != 0.0
    }

    /// Forget everything learned so far.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::empty();
    }
}

impl fmt::Display for PositionFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T: {:02}:{:02}:{:05.2}, Lat: {}, Lon: {}, Alt: {}, Fix: {}, Sat: {}, HDOP: {}",
            self.timestamp.hour,
            self.timestamp.minute,
            self.timestamp.second,
            self.latitude,
            self.longitude,
            self.altitude,
            self.fix_quality,
            self.satellites_in_use,
            self.horizontal_dilution,
        )
    }
}
