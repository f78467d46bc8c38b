//! SentenceAcquirer: pulls complete NMEA frames off the GNSS bus.

use embedded_hal::delay::DelayNs;
use log::{debug, trace};
use nmea_proto::RawFrame;

use crate::buffer::{AcquisitionBuffer, READ_CHUNK_LEN};
use crate::bus::{BusError, GnssBus};
use crate::clock::{Clock, Duration, Instant};
use crate::config::AcquisitionConfig;

/// Reads the bus in fixed-size chunks until a whole sentence is buffered.
///
/// The acquirer owns its bus, clock and delay. Leftover bytes after a frame
/// stay buffered for the next call, so a read that delivered several
/// sentences is served without touching the bus again.
///
/// # Deadlines
///
/// [`read_frame`](Self::read_frame) takes an absolute deadline. It is checked
/// once per iteration after the read, so at least one read is always made and
/// the call may overrun the deadline by one bus read.
pub struct SentenceAcquirer<B, C, D> {
    bus: B,
    clock: C,
    delay: D,
    buffer: AcquisitionBuffer,
    poll_interval: Duration,
}

impl<B: GnssBus, C: Clock, D: DelayNs> SentenceAcquirer<B, C, D> {
    /// Create an acquirer polling at the default interval.
    pub fn new(bus: B, clock: C, delay: D) -> Self {
        Self {
            bus,
            clock,
            delay,
            buffer: AcquisitionBuffer::new(),
            poll_interval: AcquisitionConfig::DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set the pause between reads that did not complete a sentence.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[inline]
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Return the next complete frame, or `None` once `deadline` has passed.
    ///
    /// A frame already sitting in the buffer is returned before the bus is
    /// read. Bus errors are returned as-is and keep everything buffered so
    /// far.
    pub fn read_frame(&mut self, deadline: Instant) -> Result<Option<RawFrame>, BusError> {
        if let Some(frame) = self.buffer.take_frame() {
            return Ok(Some(frame));
        }

        let poll_ms = u32::try_from(self.poll_interval.to_millis()).unwrap_or(u32::MAX);
        let mut chunk = [0u8; READ_CHUNK_LEN];

        loop {
            let read = self.bus.read(&mut chunk)?.min(chunk.len());
            trace!("bus read {} bytes, {} buffered", read, self.buffer.len());
            self.buffer.append(&chunk[..read]);

            if let Some(frame) = self.buffer.take_frame() {
                return Ok(Some(frame));
            }

            if self.clock.now() >= deadline {
                return Ok(None);
            }

            self.delay.delay_ms(poll_ms);
        }
    }

    /// [`read_frame`](Self::read_frame) with a deadline `timeout` from now.
    pub fn read_frame_within(&mut self, timeout: Duration) -> Result<Option<RawFrame>, BusError> {
        let deadline = self.clock.now() + timeout;
        self.read_frame(deadline)
    }

    /// Discard `reads` bus reads, then drop everything buffered.
    ///
    /// Receivers hold stale sentences from before the last power cycle;
    /// draining them keeps old positions out of the next acquisition.
    pub fn settle(&mut self, reads: usize) -> Result<(), BusError> {
        self.drain(reads, None)
    }

    /// [`settle`](Self::settle), stopping early once `deadline` has passed.
    ///
    /// The deadline is checked before each read, so an expired deadline
    /// makes no reads at all. The buffer is cleared either way.
    pub fn settle_until(&mut self, reads: usize, deadline: Instant) -> Result<(), BusError> {
        self.drain(reads, Some(deadline))
    }

    fn drain(&mut self, reads: usize, deadline: Option<Instant>) -> Result<(), BusError> {
        let mut chunk = [0u8; READ_CHUNK_LEN];
        let mut done = 0;
        while done < reads {
            if deadline.is_some_and(|deadline| self.clock.now() >= deadline) {
                break;
            }
            self.bus.read(&mut chunk)?;
            done += 1;
        }
        debug!("pre-roll: {} reads discarded, {} bytes dropped", done, self.buffer.len());
        self.buffer.clear();
        Ok(())
    }

    /// Bytes waiting for a sentence end.
    pub fn buffer(&self) -> &AcquisitionBuffer {
        &self.buffer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Decompose into bus, clock and delay. Buffered bytes are lost.
    pub fn into_parts(self) -> (B, C, D) {
        (self.bus, self.clock, self.delay)
    }
}
