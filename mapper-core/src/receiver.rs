//! GnssReceiver: turns frames into a usable position fix.

use embedded_hal::delay::DelayNs;
use log::{debug, info};
use nmea_proto::{apply_frame, PositionFix};

use crate::acquirer::SentenceAcquirer;
use crate::bus::{BusError, GnssBus};
use crate::clock::{Clock, Duration};
use crate::config::{AcquisitionConfig, FixPolicy};

/// Source of position fixes for a [`MapperNode`](crate::MapperNode).
pub trait PositionSource {
    /// Try to obtain a usable fix within `timeout`.
    fn acquire_position(&mut self, timeout: Duration) -> Result<Option<PositionFix>, BusError>;

    /// Budget for one acquisition.
    fn position_timeout(&self) -> Duration;
}

/// Accumulates sentences into a [`PositionFix`] until it becomes usable.
///
/// RMC and GLL carry the coordinates, GGA and GSA the precision, so a fix
/// usually needs several sentences. The fix lives across acquisitions unless
/// the configured [`FixPolicy`] says otherwise.
pub struct GnssReceiver<B, C, D> {
    acquirer: SentenceAcquirer<B, C, D>,
    config: AcquisitionConfig,
    fix: PositionFix,
}

impl<B: GnssBus, C: Clock, D: DelayNs> GnssReceiver<B, C, D> {
    pub fn new(bus: B, clock: C, delay: D, config: AcquisitionConfig) -> Self {
        Self {
            acquirer: SentenceAcquirer::new(bus, clock, delay).with_poll_interval(config.poll_interval),
            config,
            fix: PositionFix::empty(),
        }
    }

    /// Read sentences until the fix is usable or `timeout` runs out.
    ///
    /// Returns a copy of the fix on success and `Ok(None)` on timeout. The
    /// pre-roll reads count against `timeout` and stop once it is spent.
    /// Malformed sentences are skipped; bus errors end the attempt.
    pub fn acquire_position(&mut self, timeout: Duration) -> Result<Option<PositionFix>, BusError> {
        let start = self.acquirer.now();
        let deadline = start + timeout;

        if self.config.fix_policy == FixPolicy::ResetEachAttempt {
            self.fix.reset();
        }
        let carried_over = self.fix.is_usable();
        self.acquirer.settle_until(self.config.pre_roll_reads, deadline)?;

        loop {
            let Some(frame) = self.acquirer.read_frame(deadline)? else {
                break;
            };

            if let Err(e) = apply_frame(&mut self.fix, &frame) {
                debug!("{:?} sentence dropped: {}", frame.kind(), e);
            }

            if self.fix.is_usable() {
                if carried_over {
                    debug!("fix may be carried over from an earlier attempt");
                }
                debug!("position after {} ms", self.acquirer.clock().elapsed(start).to_millis());
                info!("Current position: {}", self.fix);
                return Ok(Some(self.fix));
            }

            // A chatty receiver can keep read_frame busy past the deadline
            if self.acquirer.now() >= deadline {
                break;
            }
        }

        info!("No position");
        Ok(None)
    }

    /// Fix accumulated so far, usable or not.
    pub fn fix(&self) -> &PositionFix {
        &self.fix
    }

    pub fn config(&self) -> &AcquisitionConfig {
        &self.config
    }

    pub fn acquirer(&self) -> &SentenceAcquirer<B, C, D> {
        &self.acquirer
    }

    pub fn acquirer_mut(&mut self) -> &mut SentenceAcquirer<B, C, D> {
        &mut self.acquirer
    }
}

impl<B: GnssBus, C: Clock, D: DelayNs> PositionSource for GnssReceiver<B, C, D> {
    #[inline]
    fn acquire_position(&mut self, timeout: Duration) -> Result<Option<PositionFix>, BusError> {
        GnssReceiver::acquire_position(self, timeout)
    }

    #[inline]
    fn position_timeout(&self) -> Duration {
        self.config.position_timeout
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::mock::{ManualClock, ScriptedBus};

    const RMC: &[u8] = b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n";
    const GGA: &[u8] = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";
    const GSA: &[u8] = b"$GPGSA,A,3,,,,,,,,,,,,,2.5,1.3,2.1\r\n";

    fn config() -> AcquisitionConfig {
        AcquisitionConfig::new().with_pre_roll_reads(0)
    }

    #[test]
    fn test_fix_from_rmc_and_gga() {
        let clock = ManualClock::new();
        let bus = ScriptedBus::new().stream(RMC, 64).stream(GGA, 64);
        let mut receiver = GnssReceiver::new(bus, &clock, clock.delay(), config());

        let fix = receiver.acquire_position(Duration::secs(12)).unwrap().unwrap();
        assert!((fix.latitude - 48.1173).abs() < 1e-4);
        assert!((fix.longitude - 11.516_666).abs() < 1e-4);
        assert_eq!(fix.altitude, 545.4);
        assert_eq!(fix.horizontal_dilution, 0.9);
        assert_eq!(fix.satellites_in_use, 8);
        assert_eq!(fix.fix_quality, 1);
        assert_eq!(receiver.fix(), &fix);
    }

    #[test]
    fn test_coordinates_alone_are_not_usable() {
        let clock = ManualClock::new();
        let bus = ScriptedBus::new().chunk(RMC);
        let mut receiver = GnssReceiver::new(bus, &clock, clock.delay(), config());

        assert_eq!(receiver.acquire_position(Duration::secs(2)).unwrap(), None);
        assert!(receiver.fix().latitude > 48.0);
        assert_eq!(receiver.fix().horizontal_dilution, 0.0);
        assert!(clock.millis() >= 2_000);
    }

    #[test]
    fn test_malformed_sentence_is_skipped() {
        let clock = ManualClock::new();
        let bus = ScriptedBus::new()
            .chunk(RMC)
            .chunk(b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,bad,545.4,M,46.9,M,,*47\r\n")
            .chunk(GSA);
        let mut receiver = GnssReceiver::new(bus, &clock, clock.delay(), config());

        let fix = receiver.acquire_position(Duration::secs(12)).unwrap().unwrap();
        assert_eq!(fix.horizontal_dilution, 1.3);
        // The malformed GGA left nothing behind
        assert_eq!(fix.altitude, 0.0);
    }

    #[test]
    fn test_pre_roll_drops_stale_output() {
        let clock = ManualClock::new();
        let bus = ScriptedBus::new()
            .chunk(b"$GPGLL,0100.00,S,00100.00,W,000000,A\r\n")
            .chunk(b"$GPGSA,A,3,,,,,,,,,,,,,2.5,5.0,2.1\r\n")
            .chunk(RMC)
            .chunk(GGA);
        let config = config().with_pre_roll_reads(2);
        let mut receiver = GnssReceiver::new(bus, &clock, clock.delay(), config);

        let fix = receiver.acquire_position(Duration::secs(12)).unwrap().unwrap();
        assert!(fix.latitude > 48.0);
        assert_eq!(fix.horizontal_dilution, 0.9);
    }

    #[test]
    fn test_persisted_fix_is_reported_again() {
        let clock = ManualClock::new();
        let bus = ScriptedBus::new().chunk(RMC).chunk(GGA).chunk(GSA);
        let mut receiver = GnssReceiver::new(bus, &clock, clock.delay(), config());

        let first = receiver.acquire_position(Duration::secs(12)).unwrap().unwrap();
        let second = receiver.acquire_position(Duration::secs(12)).unwrap().unwrap();
        assert_eq!(second.latitude, first.latitude);
        assert_eq!(second.horizontal_dilution, 1.3);
    }

    #[test]
    fn test_persisted_fix_survives_void_rmc() {
        let clock = ManualClock::new();
        let bus = ScriptedBus::new()
            .chunk(RMC)
            .chunk(GGA)
            .chunk(b"$GNRMC,104529.000,V,,,,,,,180326,,,N*5C\r\n");
        let mut receiver = GnssReceiver::new(bus, &clock, clock.delay(), config());

        let first = receiver.acquire_position(Duration::secs(12)).unwrap().unwrap();
        // The void RMC is malformed and leaves the earlier position in place
        let second = receiver.acquire_position(Duration::secs(12)).unwrap().unwrap();
        assert_eq!(second, first);
    }

    #[test]
    fn test_reset_policy_starts_empty() {
        let clock = ManualClock::new();
        let bus = ScriptedBus::new().chunk(RMC).chunk(GGA).chunk(GSA);
        let config = config().with_fix_policy(FixPolicy::ResetEachAttempt);
        let mut receiver = GnssReceiver::new(bus, &clock, clock.delay(), config);

        assert!(receiver.acquire_position(Duration::secs(12)).unwrap().is_some());
        assert_eq!(receiver.acquire_position(Duration::secs(3)).unwrap(), None);
        assert_eq!(receiver.fix().latitude, 0.0);
        assert_eq!(receiver.fix().horizontal_dilution, 1.3);
    }

    #[test]
    fn test_equator_is_not_usable() {
        let clock = ManualClock::new();
        let bus = ScriptedBus::new()
            .chunk(b"$GPGLL,0000.00,N,01131.000,E,123519,A\r\n")
            .chunk(GSA);
        let mut receiver = GnssReceiver::new(bus, &clock, clock.delay(), config());

        assert_eq!(receiver.acquire_position(Duration::secs(1)).unwrap(), None);
    }

    #[test]
    fn test_bus_error_ends_attempt() {
        let clock = ManualClock::new();
        let bus = ScriptedBus::new().chunk(RMC).error(BusError::ArbitrationLoss).chunk(GGA);
        let mut receiver = GnssReceiver::new(bus, &clock, clock.delay(), config());

        assert_eq!(
            receiver.acquire_position(Duration::secs(12)),
            Err(BusError::ArbitrationLoss)
        );
        // The fix survives and the next attempt completes it
        let fix = receiver.acquire_position(Duration::secs(12)).unwrap().unwrap();
        assert_eq!(fix.altitude, 545.4);
    }

    #[test]
    fn test_zero_timeout_skips_pre_roll() {
        let clock = ManualClock::new();
        let bus = ScriptedBus::new();
        let mut receiver = GnssReceiver::new(bus, &clock, clock.delay(), AcquisitionConfig::new());

        assert_eq!(receiver.acquire_position(Duration::millis(0)).unwrap(), None);
        // One read from the frame loop, none from the twenty pre-roll reads
        assert_eq!(receiver.acquirer().bus().reads(), 1);
    }

    #[test]
    fn test_pre_roll_stops_when_timeout_is_spent() {
        let clock = ManualClock::new();
        let bus = ScriptedBus::new();
        let config = AcquisitionConfig::new().with_pre_roll_reads(5);
        let mut receiver = GnssReceiver::new(bus, &clock, clock.delay(), config);

        assert_eq!(receiver.acquire_position(Duration::millis(300)).unwrap(), None);
        // Five pre-roll reads, then frame reads at 0, 100, 200 and 300 ms
        assert_eq!(receiver.acquirer().bus().reads(), 9);
    }

    #[test]
    fn test_endless_sentences_respect_deadline() {
        let clock = ManualClock::new();
        let mut bus = ScriptedBus::new();
        for _ in 0..100 {
            // Three sentences per read keep frames buffered between reads
            bus = bus.chunk(b"$GPGSA,A,1\r\n$GPGSA,A,1\r\n$GPGSA,A,1\r\n");
        }
        let mut receiver = GnssReceiver::new(bus, &clock, clock.delay(), config());

        assert_eq!(receiver.acquire_position(Duration::millis(0)).unwrap(), None);
        assert_eq!(receiver.acquirer().bus().reads(), 1);
    }
}
