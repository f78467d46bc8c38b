//! Sentence framing types: [`RawFrame`] and [`SentenceKind`].

use core::fmt;
use heapless::Vec;

/// Bytes that open a sentence from any GNSS talker (`$GP`, `$GN`, `$GL`, ...).
pub const START_MARKER: &[u8; 2] = b"$G";

/// Bytes that close a sentence.
pub const END_MARKER: &[u8; 2] = b"\r\n";

/// Largest sentence body accepted as a frame.
///
/// NMEA-0183 caps a sentence at 82 characters including `$` and CR LF; the
/// extra room tolerates receivers that run slightly long.
pub const MAX_FRAME_LEN: usize = 128;

/// Error building a [`RawFrame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Body is longer than [`MAX_FRAME_LEN`].
    TooLong,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong => write!(f, "frame longer than {} bytes", MAX_FRAME_LEN),
        }
    }
}

/// One sentence body, from the talker ID up to (not including) CR LF.
///
/// The leading `$` is not part of the frame, so a GGA frame starts with
/// `GPGGA,` and field 0 is the full address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawFrame {
    bytes: Vec<u8, MAX_FRAME_LEN>,
}

impl RawFrame {
    /// Copy a sentence body into a new frame.
    pub fn from_slice(body: &[u8]) -> Result<Self, FrameError> {
        Vec::from_slice(body)
            .map(|bytes| Self { bytes })
            .map_err(|_| FrameError::TooLong)
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Sentence kind named by the address field.
    #[must_use]
    pub fn kind(&self) -> SentenceKind {
        let address = self
            .bytes
            .split(|&b| b == b',')
            .next()
            .unwrap_or_default();
        SentenceKind::from_address(address)
    }
}

impl AsRef<[u8]> for RawFrame {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl TryFrom<&[u8]> for RawFrame {
    type Error = FrameError;

    fn try_from(body: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(body)
    }
}

/// Sentence kinds understood by the position extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SentenceKind {
    /// Recommended minimum data: position.
    Rmc,
    /// Fix data: dilution, altitude, quality.
    Gga,
    /// Geographic position.
    Gll,
    /// DOP and active satellites.
    Gsa,
    /// Anything else; ignored.
    Other,
}

impl SentenceKind {
    /// Classify an address field such as `GPRMC` or `GNGGA` by its last
    /// three characters, whatever the talker.
    #[must_use]
    pub fn from_address(address: &[u8]) -> Self {
        if address.len() < 3 {
            return Self::Other;
        }
        match &address[address.len() - 3..] {
            b"RMC" => Self::Rmc,
            b"GGA" => Self::Gga,
            b"GLL" => Self::Gll,
            b"GSA" => Self::Gsa,
            _ => Self::Other,
        }
    }
}
