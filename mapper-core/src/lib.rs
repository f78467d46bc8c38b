//! Platform-agnostic GNSS acquisition and the mapper cycle built on it.
//!
//! This crate drives a GNSS receiver through a handful of small capability
//! traits, so it runs unchanged on a microcontroller and on host for
//! testing.
//!
//! # Overview
//!
//! - [`bus`]: byte source trait ([`GnssBus`]) and [`BusError`]
//! - [`clock`]: monotonic time ([`Clock`], [`Instant`], [`Duration`])
//! - [`buffer`]: rolling sentence buffer ([`AcquisitionBuffer`])
//! - [`acquirer`]: deadline-bounded frame reads ([`SentenceAcquirer`])
//! - [`receiver`]: fix accumulation ([`GnssReceiver`])
//! - [`mapper`]: acquire, encode and send ([`MapperNode`])
//! - [`config`]: timing and policy ([`AcquisitionConfig`])
//!
//! Delays come from [`embedded_hal::delay::DelayNs`].
//!
//! # Example
//!
//! ```rust
//! use core::cell::Cell;
//! use embedded_hal::delay::DelayNs;
//! use mapper_core::{AcquisitionConfig, BusError, Clock, GnssBus, GnssReceiver, Instant};
//!
//! struct Replay<'a>(&'a [u8]);
//!
//! impl GnssBus for Replay<'_> {
//!     fn read(&mut self, buf: &mut [u8]) -> Result<usize, BusError> {
//!         let n = self.0.len().min(buf.len());
//!         buf[..n].copy_from_slice(&self.0[..n]);
//!         self.0 = &self.0[n..];
//!         Ok(n)
//!     }
//! }
//!
//! struct Ticks(Cell<u64>);
//!
//! impl Clock for Ticks {
//!     fn now(&self) -> Instant {
//!         Instant::from_ticks(self.0.get())
//!     }
//! }
//!
//! struct Sleep<'a>(&'a Ticks);
//!
//! impl DelayNs for Sleep<'_> {
//!     fn delay_ns(&mut self, ns: u32) {
//!         let t = &self.0 .0;
//!         t.set(t.get() + u64::from(ns) / 1_000_000);
//!     }
//!
//!     fn delay_ms(&mut self, ms: u32) {
//!         let t = &self.0 .0;
//!         t.set(t.get() + u64::from(ms));
//!     }
//! }
//!
//! let stream = b"$GPGLL,4916.45,N,12311.12,W,225444,A\r\n$GPGSA,A,3,,,,,,,,,,,,,2.5,1.3,2.1\r\n";
//! let ticks = Ticks(Cell::new(0));
//! let config = AcquisitionConfig::new().with_pre_roll_reads(0);
//! let mut receiver = GnssReceiver::new(Replay(stream), &ticks, Sleep(&ticks), config);
//!
//! let fix = receiver.acquire_position(config.position_timeout).unwrap().unwrap();
//! assert!(fix.latitude > 49.0);
//! assert_eq!(fix.horizontal_dilution, 1.3);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod acquirer;
pub mod buffer;
pub mod bus;
pub mod clock;
pub mod config;
pub mod indicator;
pub mod mapper;
pub mod receiver;
pub mod uplink;

#[cfg(test)]
pub(crate) mod mock;

// Re-export main types at crate root
pub use acquirer::SentenceAcquirer;
pub use buffer::{AcquisitionBuffer, BUFFER_CAPACITY, BUFFER_CEILING, READ_CHUNK_LEN};
pub use bus::{BusError, GnssBus};
pub use clock::{Clock, Duration, Instant};
pub use config::{AcquisitionConfig, FixPolicy};
pub use indicator::{MapperStatus, NullIndicator, StatusIndicator};
pub use mapper::{CycleOutcome, MapperError, MapperNode};
pub use receiver::{GnssReceiver, PositionSource};
pub use uplink::{Uplink, UplinkError};
