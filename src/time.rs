use mapper_core::{Clock, Instant};

/// [`Clock`] reading the embassy time driver.
///
/// Pair it with `embassy_time::Delay`, which implements `DelayNs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::from_ticks(embassy_time::Instant::now().as_millis())
    }
}
