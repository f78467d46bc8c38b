//! NMEA-0183 position parsing and the mapper uplink payload.
//!
//! This crate holds everything about the data itself, with no I/O:
//!
//! - **Types**: [`PositionFix`] accumulator and its [`Timestamp`]
//! - **Framing**: [`RawFrame`] sentence bodies and their [`SentenceKind`]
//! - **Parsing**: [`apply_frame()`] updates a fix from RMC, GGA, GLL and GSA
//!   sentences
//! - **Payload**: [`encode()`] / [`decode()`] for the 9-byte fixed-point
//!   uplink format
//!
//! # Example
//!
//! ```
//! use nmea_proto::{apply_frame, encode, PositionFix, RawFrame};
//!
//! let mut fix = PositionFix::default();
//! for body in [
//!     &b"GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A"[..],
//!     &b"GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47"[..],
//! ] {
//!     let frame = RawFrame::from_slice(body).unwrap();
//!     apply_frame(&mut fix, &frame).unwrap();
//! }
//!
//! assert!(fix.is_usable());
//! let payload = encode(&fix);
//! assert_eq!(payload[8], 9); // HDOP 0.9
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod parser;
pub mod payload;
pub mod sentence;
pub mod types;

pub use parser::{apply_frame, apply_sentence, parse_coordinate, ParseError};
pub use payload::{decode, encode, DecodedPosition, COORDINATE_SCALE, PAYLOAD_LEN};
pub use sentence::{FrameError, RawFrame, SentenceKind, END_MARKER, MAX_FRAME_LEN, START_MARKER};
pub use types::{PositionFix, Timestamp};
