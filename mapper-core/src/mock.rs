//! Hand-written capability mocks shared by the unit tests.

extern crate std;

use core::cell::Cell;
use embedded_hal::delay::DelayNs;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use crate::bus::{BusError, GnssBus};
use crate::clock::{Clock, Instant};
use crate::indicator::{MapperStatus, StatusIndicator};
use crate::uplink::{Uplink, UplinkError};

/// Bus replaying queued chunks and errors, then returning empty reads.
pub struct ScriptedBus {
    script: VecDeque<Result<Vec<u8>, BusError>>,
    reads: usize,
}

impl ScriptedBus {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            reads: 0,
        }
    }

    /// Queue one read returning `bytes`.
    pub fn chunk(mut self, bytes: &[u8]) -> Self {
        self.script.push_back(Ok(bytes.to_vec()));
        self
    }

    /// Queue `bytes` split into reads of `size` bytes.
    pub fn stream(mut self, bytes: &[u8], size: usize) -> Self {
        for chunk in bytes.chunks(size) {
            self.script.push_back(Ok(chunk.to_vec()));
        }
        self
    }

    pub fn error(mut self, error: BusError) -> Self {
        self.script.push_back(Err(error));
        self
    }

    /// Reads still queued.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Reads served so far, including empty ones.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl GnssBus for ScriptedBus {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BusError> {
        self.reads += 1;
        match self.script.pop_front() {
            None => Ok(0),
            Some(Err(e)) => Err(e),
            Some(Ok(mut bytes)) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                if n < bytes.len() {
                    // Oversized chunk, serve the rest on the next read
                    self.script.push_front(Ok(bytes.split_off(n)));
                }
                Ok(n)
            }
        }
    }
}

/// Clock that only moves when its [`ManualDelay`] sleeps.
///
/// Time is kept in nanoseconds so sub-millisecond delays add up.
#[derive(Clone, Default)]
pub struct ManualClock {
    nanos: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delay(&self) -> ManualDelay {
        ManualDelay {
            nanos: self.nanos.clone(),
        }
    }

    pub fn millis(&self) -> u64 {
        self.nanos.get() / 1_000_000
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        Instant::from_ticks(self.millis())
    }
}

pub struct ManualDelay {
    nanos: Rc<Cell<u64>>,
}

impl DelayNs for ManualDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.nanos.set(self.nanos.get() + u64::from(ns));
    }
}

/// Uplink keeping every payload it was asked to send.
pub struct RecordingUplink {
    pub sent: Vec<Vec<u8>>,
    failure: Option<UplinkError>,
}

impl RecordingUplink {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            failure: None,
        }
    }

    pub fn failing(error: UplinkError) -> Self {
        Self {
            sent: Vec::new(),
            failure: Some(error),
        }
    }
}

impl Uplink for RecordingUplink {
    fn send(&mut self, payload: &[u8]) -> Result<usize, UplinkError> {
        if let Some(e) = self.failure {
            return Err(e);
        }
        self.sent.push(payload.to_vec());
        Ok(payload.len())
    }
}

pub struct RecordingIndicator {
    pub shown: Vec<MapperStatus>,
}

impl RecordingIndicator {
    pub fn new() -> Self {
        Self { shown: Vec::new() }
    }
}

impl StatusIndicator for RecordingIndicator {
    fn show(&mut self, status: MapperStatus) {
        self.shown.push(status);
    }
}
