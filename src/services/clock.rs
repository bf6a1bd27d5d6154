//! Time source for ids and timestamps
//!
//! New zone and novela ids are derived from clock ticks in epoch
//! milliseconds. [`MonotonicClock`] guarantees every tick is strictly later
//! than the previous one, so two commands in the same millisecond still get
//! distinct ids and an update always moves `updatedAt` forward.

use chrono::{DateTime, TimeZone, Utc};

/// Source of wall-clock time
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Millisecond ticks that never repeat or go backwards
pub struct MonotonicClock {
    source: Box<dyn Clock>,
    last_millis: i64,
}

impl MonotonicClock {
    pub fn new(source: Box<dyn Clock>) -> Self {
        Self {
            source,
            last_millis: i64::MIN,
        }
    }

    pub fn system() -> Self {
        Self::new(Box::new(SystemClock))
    }

    /// Make sure future ticks are later than `at`
    pub fn observe(&mut self, at: DateTime<Utc>) {
        self.last_millis = self.last_millis.max(at.timestamp_millis());
    }

    /// Next tick, truncated to the millisecond
    pub fn tick(&mut self) -> DateTime<Utc> {
        let now = self.source.now();
        let millis = now.timestamp_millis().max(self.last_millis.saturating_add(1));
        self.last_millis = millis;
        Utc.timestamp_millis_opt(millis).single().unwrap_or(now)
    }
}

impl std::fmt::Debug for MonotonicClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonotonicClock")
            .field("last_millis", &self.last_millis)
            .finish()
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frozen() -> MonotonicClock {
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        MonotonicClock::new(Box::new(FixedClock(at)))
    }

    #[test]
    fn test_ticks_strictly_increase() {
        let mut clock = frozen();
        let a = clock.tick();
        let b = clock.tick();
        let c = clock.tick();

        assert!(a < b && b < c);
        assert_eq!(b.timestamp_millis() - a.timestamp_millis(), 1);
    }

    #[test]
    fn test_observe_moves_past_existing_timestamps() {
        let mut clock = frozen();
        let future = Utc.timestamp_millis_opt(1_800_000_000_000).unwrap();

        clock.observe(future);
        assert!(clock.tick() > future);
    }

    #[test]
    fn test_ticks_are_whole_milliseconds() {
        let mut clock = MonotonicClock::system();
        let tick = clock.tick();
        assert_eq!(tick.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
