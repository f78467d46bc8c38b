//! MapperNode: one acquire, encode and send cycle.

use core::fmt;

use log::info;
use nmea_proto::{encode, PAYLOAD_LEN};

use crate::bus::BusError;
use crate::indicator::{MapperStatus, StatusIndicator};
use crate::receiver::PositionSource;
use crate::uplink::{Uplink, UplinkError};

/// Result of a completed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// A position was found and handed to the uplink.
    Sent {
        payload: [u8; PAYLOAD_LEN],
        bytes_sent: usize,
    },
    /// No usable position before the timeout.
    NoPosition,
}

/// Error type for mapper cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MapperError {
    /// Reading the GNSS receiver failed.
    Bus(BusError),
    /// Sending the payload failed.
    Uplink(UplinkError),
}

impl fmt::Display for MapperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "GNSS: {}", e),
            Self::Uplink(e) => write!(f, "uplink: {}", e),
        }
    }
}

impl From<BusError> for MapperError {
    fn from(e: BusError) -> Self {
        Self::Bus(e)
    }
}

impl From<UplinkError> for MapperError {
    fn from(e: UplinkError) -> Self {
        Self::Uplink(e)
    }
}

/// Periodic mapping task: find the position, send it, report progress.
///
/// The node is driven from outside, typically by a timer firing every
/// few seconds. Each [`run_cycle`](Self::run_cycle) stands alone; after an
/// error the next cycle is the retry.
pub struct MapperNode<R, U, S> {
    receiver: R,
    uplink: U,
    indicator: S,
}

impl<R: PositionSource, U: Uplink, S: StatusIndicator> MapperNode<R, U, S> {
    pub fn new(receiver: R, uplink: U, indicator: S) -> Self {
        Self {
            receiver,
            uplink,
            indicator,
        }
    }

    /// Acquire a position and send it as a mapper payload.
    ///
    /// The indicator shows [`MapperStatus::Acquiring`] while the receiver is
    /// read, then the outcome, and always ends at [`MapperStatus::Off`].
    pub fn run_cycle(&mut self) -> Result<CycleOutcome, MapperError> {
        self.indicator.show(MapperStatus::Acquiring);
        let result = self.acquire_and_send();
        self.indicator.show(MapperStatus::Off);
        result
    }

    fn acquire_and_send(&mut self) -> Result<CycleOutcome, MapperError> {
        let timeout = self.receiver.position_timeout();
        let Some(fix) = self.receiver.acquire_position(timeout)? else {
            self.indicator.show(MapperStatus::PositionNotFound);
            return Ok(CycleOutcome::NoPosition);
        };

        self.indicator.show(MapperStatus::PositionFound);
        let payload = encode(&fix);
        let bytes_sent = self.uplink.send(&payload)?;
        info!("Message sent: {:02X?} ({} bytes)", payload, bytes_sent);

        Ok(CycleOutcome::Sent { payload, bytes_sent })
    }

    pub fn receiver(&self) -> &R {
        &self.receiver
    }

    pub fn receiver_mut(&mut self) -> &mut R {
        &mut self.receiver
    }

    pub fn uplink(&self) -> &U {
        &self.uplink
    }

    pub fn indicator(&self) -> &S {
        &self.indicator
    }

    /// Decompose the node into receiver, uplink and indicator.
    pub fn into_parts(self) -> (R, U, S) {
        (self.receiver, self.uplink, self.indicator)
    }
}
