//! Monotonic clock capability.

/// Millisecond instant on the monotonic clock.
pub type Instant = fugit::Instant<u64, 1, 1_000>;

/// Millisecond duration.
pub type Duration = fugit::Duration<u64, 1, 1_000>;

/// Monotonic time source used for acquisition deadlines.
pub trait Clock {
    fn now(&self) -> Instant;

    /// Time passed since `since`, zero if `since` lies in the future.
    #[inline]
    fn elapsed(&self, since: Instant) -> Duration {
        self.now()
            .checked_duration_since(since)
            .unwrap_or(Duration::from_ticks(0))
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    #[inline]
    fn now(&self) -> Instant {
        T::now(self)
    }
}
