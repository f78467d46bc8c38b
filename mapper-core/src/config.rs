//! Acquisition tuning.

use crate::clock::Duration;

/// What happens to the accumulated fix when a new acquisition starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FixPolicy {
    /// Keep values from earlier attempts; a fix that was usable before is
    /// reported again after the first frame of the new attempt.
    #[default]
    Persist,
    /// Start every attempt from an empty fix.
    ResetEachAttempt,
}

/// Timing and policy for [`GnssReceiver`](crate::GnssReceiver).
///
/// # Example
///
/// ```
/// use mapper_core::{AcquisitionConfig, Duration, FixPolicy};
///
/// let config = AcquisitionConfig::new()
///     .with_position_timeout(Duration::secs(30))
///     .with_pre_roll_reads(0)
///     .with_fix_policy(FixPolicy::ResetEachAttempt);
/// assert_eq!(config.poll_interval, Duration::millis(100));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitionConfig {
    /// Budget for one position acquisition.
    pub position_timeout: Duration,
    /// Pause between bus reads that did not complete a sentence.
    pub poll_interval: Duration,
    /// Bus reads discarded before each acquisition to flush stale receiver
    /// output.
    pub pre_roll_reads: usize,
    pub fix_policy: FixPolicy,
}

impl AcquisitionConfig {
    pub const DEFAULT_POSITION_TIMEOUT: Duration = Duration::secs(12);
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::millis(100);
    pub const DEFAULT_PRE_ROLL_READS: usize = 20;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            position_timeout: Self::DEFAULT_POSITION_TIMEOUT,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            pre_roll_reads: Self::DEFAULT_PRE_ROLL_READS,
            fix_policy: FixPolicy::Persist,
        }
    }

    #[must_use]
    pub const fn with_position_timeout(mut self, timeout: Duration) -> Self {
        self.position_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub const fn with_pre_roll_reads(mut self, reads: usize) -> Self {
        self.pre_roll_reads = reads;
        self
    }

    #[must_use]
    pub const fn with_fix_policy(mut self, policy: FixPolicy) -> Self {
        self.fix_policy = policy;
        self
    }
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AcquisitionConfig::default();
        assert_eq!(config.position_timeout.to_millis(), 12_000);
        assert_eq!(config.poll_interval.to_millis(), 100);
        assert_eq!(config.pre_roll_reads, 20);
        assert_eq!(config.fix_policy, FixPolicy::Persist);
    }

    #[test]
    fn test_builders() {
        let config = AcquisitionConfig::new()
            .with_poll_interval(Duration::millis(250))
            .with_pre_roll_reads(3);
        assert_eq!(config.poll_interval.to_millis(), 250);
        assert_eq!(config.pre_roll_reads, 3);
        assert_eq!(config.position_timeout, AcquisitionConfig::DEFAULT_POSITION_TIMEOUT);
    }
}
