//! Fixed-point position payload for the radio uplink.
//!
//! # Layout
//!
//! ```text
//! byte  0..3   latitude   (lat + 90) / 180 * (2^24 - 1), truncated, big-endian
//! byte  3..6   longitude  (lon + 180) / 360 * (2^24 - 1), truncated, big-endian
//! byte  6..8   altitude   meters, truncated, low 16 bits, big-endian
//! byte  8      hdop       hdop * 10, truncated, low 8 bits
//! ```
//!
//! Altitude and HDOP wrap instead of saturating: a negative altitude shows up
//! as its 16-bit two's complement, and an HDOP of 25.6 or worse wraps through
//! zero. Latitude and longitude outside ±90 / ±180 are not meaningful.
//!
//! # Example
//!
//! ```
//! use nmea_proto::{encode, PositionFix};
//!
//! let payload = encode(&PositionFix::default());
//! assert_eq!(payload, [0x7F, 0xFF, 0xFF, 0x7F, 0xFF, 0xFF, 0x00, 0x00, 0x00]);
//! ```

use crate::types::PositionFix;

/// Size of an encoded position.
pub const PAYLOAD_LEN: usize = 9;

/// Full scale of a 24-bit coordinate field.
pub const COORDINATE_SCALE: f64 = 16_777_215.0;

/// Position recovered from a payload, at payload precision.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodedPosition {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters, as the signed reading of the 16-bit field.
    pub altitude: i16,
    pub horizontal_dilution: f64,
}

/// Quantize a fix into the 9-byte uplink payload.
#[must_use]
pub fn encode(fix: &PositionFix) -> [u8; PAYLOAD_LEN] {
    let latitude = quantize(fix.latitude + 90.0, 180.0).to_be_bytes();
    let longitude = quantize(fix.longitude + 180.0, 360.0).to_be_bytes();
    let altitude = (fix.altitude as i32 as u16).to_be_bytes();
    let hdop = (fix.horizontal_dilution * 10.0) as i32 as u8;

    [
        latitude[1],
        latitude[2],
        latitude[3],
        longitude[1],
        longitude[2],
        longitude[3],
        altitude[0],
        altitude[1],
        hdop,
    ]
}

/// Read a payload back into degrees, meters and HDOP.
///
/// This is what the network side does with an uplink; precision is limited
/// to one quantization step (about 1.1e-5 degrees latitude) and 0.1 HDOP.
#[must_use]
pub fn decode(payload: &[u8; PAYLOAD_LEN]) -> DecodedPosition {
    let latitude = u32::from_be_bytes([0, payload[0], payload[1], payload[2]]);
    let longitude = u32::from_be_bytes([0, payload[3], payload[4], payload[5]]);

    DecodedPosition {
        latitude: f64::from(latitude) / COORDINATE_SCALE * 180.0 - 90.0,
        longitude: f64::from(longitude) / COORDINATE_SCALE * 360.0 - 180.0,
        altitude: i16::from_be_bytes([payload[6], payload[7]]),
        horizontal_dilution: f64::from(payload[8]) / 10.0,
    }
}

/// Map `offset` in `0..=span` onto the 24-bit range.
#[inline]
fn quantize(offset: f64, span: f64) -> u32 {
    (offset / span * COORDINATE_SCALE) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(latitude: f64, longitude: f64, altitude: f64, hdop: f64) -> PositionFix {
        PositionFix {
            latitude,
            longitude,
            altitude,
            horizontal_dilution: hdop,
            ..PositionFix::empty()
        }
    }

    #[test]
    fn test_encode_origin() {
        assert_eq!(
            encode(&fix(0.0, 0.0, 0.0, 0.0)),
            [0x7F, 0xFF, 0xFF, 0x7F, 0xFF, 0xFF, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_encode_coordinate_extremes() {
        let payload = encode(&fix(90.0, 180.0, 0.0, 0.0));
        assert_eq!(&payload[..6], &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);

        let payload = encode(&fix(-90.0, -180.0, 0.0, 0.0));
        assert_eq!(&payload[..6], &[0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_encode_altitude() {
        assert_eq!(&encode(&fix(0.0, 0.0, 545.4, 0.0))[6..8], &[0x02, 0x21]);
        // Truncation toward zero, then two's complement
        assert_eq!(&encode(&fix(0.0, 0.0, -1.5, 0.0))[6..8], &[0xFF, 0xFF]);
        assert_eq!(&encode(&fix(0.0, 0.0, -12.0, 0.0))[6..8], &[0xFF, 0xF4]);
        // Only the low 16 bits survive
        assert_eq!(&encode(&fix(0.0, 0.0, 70_000.0, 0.0))[6..8], &[0x11, 0x70]);
    }

    #[test]
    fn test_encode_hdop() {
        assert_eq!(encode(&fix(0.0, 0.0, 0.0, 0.9))[8], 9);
        assert_eq!(encode(&fix(0.0, 0.0, 0.0, 1.0))[8], 10);
        assert_eq!(encode(&fix(0.0, 0.0, 0.0, 25.5))[8], 255);
        // Wraps through zero past 25.5
        assert_eq!(encode(&fix(0.0, 0.0, 0.0, 25.6))[8], 0);
        assert_eq!(encode(&fix(0.0, 0.0, 0.0, 30.0))[8], 44);
    }

    #[test]
    fn test_decode_recovers_position() {
        let original = fix(48.117_3, 11.516_666, 545.4, 0.9);
        let decoded = decode(&encode(&original));

        let step = 360.0 / COORDINATE_SCALE;
        assert!((decoded.latitude - original.latitude).abs() <= step);
        assert!((decoded.longitude - original.longitude).abs() <= step);
        assert_eq!(decoded.altitude, 545);
        assert!((decoded.horizontal_dilution - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_decode_negative_altitude() {
        let decoded = decode(&encode(&fix(-33.9, 151.2, -27.0, 2.0)));
        assert_eq!(decoded.altitude, -27);
        assert!(decoded.latitude < 0.0);
        assert!(decoded.longitude > 0.0);
    }
}
