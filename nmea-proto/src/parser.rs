//! Position extraction from NMEA-0183 sentences.
//!
//! Supports four sentence kinds, each with a fixed field layout (indices
//! count the address field as 0):
//!
//! | Kind | Fields used |
//! |------|-------------|
//! | RMC  | 1 time, 3/4 latitude + N/S, 5/6 longitude + E/W |
//! | GGA  | 1 time, 6 fix quality, 7 satellites, 8 HDOP, 9 altitude |
//! | GLL  | 1/2 latitude + N/S, 3/4 longitude + E/W, 5 time |
//! | GSA  | 16 HDOP |
//!
//! Coordinates use the packed `DDMM.MMMM` / `DDDMM.MMMM` format. A frame is
//! applied all or nothing: if any required field fails to parse, the fix is
//! left untouched and [`ParseError::Malformed`] is returned. Checksums are not
//! verified; a trailing `*hh` is simply cut off.

use core::fmt;

use crate::sentence::{RawFrame, SentenceKind};
use crate::types::{PositionFix, Timestamp};

/// Sentence could not be applied to the fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Non-ASCII text, a missing field, or a field that is not a valid number.
    Malformed,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed sentence"),
        }
    }
}

/// Update `fix` from one acquired frame.
///
/// Unsupported sentence kinds are a no-op and return `Ok(())`.
///
/// # Example
///
/// ```
/// use nmea_proto::{apply_frame, PositionFix, RawFrame};
///
/// let mut fix = PositionFix::default();
/// let frame = RawFrame::from_slice(b"GPGLL,4916.45,N,12311.12,W,225444,A").unwrap();
/// apply_frame(&mut fix, &frame).unwrap();
/// assert!((fix.latitude - 49.274_166).abs() < 1e-5);
/// assert!(fix.longitude < 0.0);
/// ```
pub fn apply_frame(fix: &mut PositionFix, frame: &RawFrame) -> Result<(), ParseError> {
    apply_sentence(fix, frame.as_bytes())
}

/// Same as [`apply_frame`] for a sentence body that is not wrapped in a
/// [`RawFrame`].
pub fn apply_sentence(fix: &mut PositionFix, body: &[u8]) -> Result<(), ParseError> {
    let fields = Fields::new(body)?;

    match SentenceKind::from_address(fields.get(0)?.as_bytes()) {
        SentenceKind::Rmc => {
            let latitude = parse_coordinate(fields.get(3)?, fields.get(4)?, "S")?;
            let longitude = parse_coordinate(fields.get(5)?, fields.get(6)?, "W")?;
            let timestamp = fields.optional(1).map(parse_timestamp).transpose()?;

            fix.latitude = latitude;
            fix.longitude = longitude;
            if let Some(timestamp) = timestamp {
                fix.timestamp = timestamp;
            }
        }
        SentenceKind::Gga => {
            let hdop = parse_f64(fields.get(8)?)?;
            let altitude = parse_f64(fields.get(9)?)?;
            let timestamp = fields.optional(1).map(parse_timestamp).transpose()?;
            let quality = fields.optional(6).map(parse_u8).transpose()?;
            let satellites = fields.optional(7).map(parse_u8).transpose()?;

            fix.horizontal_dilution = hdop;
            fix.altitude = altitude;
            if let Some(timestamp) = timestamp {
                fix.timestamp = timestamp;
            }
            if let Some(quality) = quality {
                fix.fix_quality = quality;
            }
            if let Some(satellites) = satellites {
                fix.satellites_in_use = satellites;
            }
        }
        SentenceKind::Gll => {
            let latitude = parse_coordinate(fields.get(1)?, fields.get(2)?, "S")?;
            let longitude = parse_coordinate(fields.get(3)?, fields.get(4)?, "W")?;
            let timestamp = fields.optional(5).map(parse_timestamp).transpose()?;

            fix.latitude = latitude;
            fix.longitude = longitude;
            if let Some(timestamp) = timestamp {
                fix.timestamp = timestamp;
            }
        }
        SentenceKind::Gsa => {
            fix.horizontal_dilution = parse_f64(fields.get(16)?)?;
        }
        SentenceKind::Other => {}
    }

    Ok(())
}

/// Convert a packed degrees-minutes value to signed decimal degrees.
///
/// `degrees = floor(raw / 100) + (raw mod 100) / 60`, negated when the
/// hemisphere letter equals `negative`.
pub fn parse_coordinate(value: &str, hemisphere: &str, negative: &str) -> Result<f64, ParseError> {
    let raw = parse_f64(value)?;
    if raw < 0.0 {
        return Err(ParseError::Malformed);
    }

    // Truncation is floor here since raw is non-negative
    let whole = (raw / 100.0) as u32;
    let minutes = raw - f64::from(whole) * 100.0;
    let degrees = f64::from(whole) + minutes / 60.0;

    if hemisphere == negative {
        Ok(-degrees)
    } else {
        Ok(degrees)
    }
}

/// Comma-separated view over an ASCII sentence body.
struct Fields<'a> {
    line: &'a str,
}

impl<'a> Fields<'a> {
    fn new(body: &'a [u8]) -> Result<Self, ParseError> {
        if !body.is_ascii() {
            return Err(ParseError::Malformed);
        }
        let line = core::str::from_utf8(body).map_err(|_| ParseError::Malformed)?;
        let line = line.rsplit_once('*').map_or(line, |(data, _checksum)| data);
        Ok(Self { line })
    }

    /// Field at `index`, which must exist (it may be empty).
    #[inline]
    fn get(&self, index: usize) -> Result<&'a str, ParseError> {
        self.line.split(',').nth(index).ok_or(ParseError::Malformed)
    }

    /// Field at `index` if present and non-empty.
    #[inline]
    fn optional(&self, index: usize) -> Option<&'a str> {
        self.line.split(',').nth(index).filter(|s| !s.is_empty())
    }
}

#[inline]
fn parse_f64(s: &str) -> Result<f64, ParseError> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ParseError::Malformed),
    }
}

#[inline]
fn parse_u8(s: &str) -> Result<u8, ParseError> {
    s.parse::<u8>().map_err(|_| ParseError::Malformed)
}

/// Parse `hhmmss` or `hhmmss.ss`.
fn parse_timestamp(s: &str) -> Result<Timestamp, ParseError> {
    let bytes = s.as_bytes();
    if bytes.len() < 6 || !bytes[..4].iter().all(u8::is_ascii_digit) {
        return Err(ParseError::Malformed);
    }

    // All ASCII, so byte offsets are char boundaries
    let hour = parse_u8(&s[0..2])?;
    let minute = parse_u8(&s[2..4])?;
    let second = s[4..].parse::<f32>().map_err(|_| ParseError::Malformed)?;

    if hour > 23 || minute > 59 || !(0.0..61.0).contains(&second) {
        return Err(ParseError::Malformed);
    }

    Ok(Timestamp::new(hour, minute, second))
}
