//! TTN mapper node for the Quectel L76 GNSS receiver.
//!
//! Ties the platform-agnostic [`mapper_core`] cycle to real peripherals:
//! [`I2cBus`] and [`UartBus`] adapt `embedded-hal` and `embedded-io`
//! drivers to [`GnssBus`], and with the `embassy` feature [`EmbassyClock`]
//! supplies time. The payload format lives in [`nmea_proto`].

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod bus;
#[cfg(feature = "embassy")]
pub mod time;

pub use mapper_core;
pub use nmea_proto;

pub use bus::{I2cBus, UartBus, L76_I2C_ADDRESS};
#[cfg(feature = "embassy")]
pub use time::EmbassyClock;

pub use mapper_core::{
    AcquisitionConfig, BusError, CycleOutcome, FixPolicy, GnssBus, GnssReceiver, MapperError,
    MapperNode, MapperStatus, NullIndicator, StatusIndicator, Uplink, UplinkError,
};
pub use nmea_proto::{encode, PositionFix, PAYLOAD_LEN};
