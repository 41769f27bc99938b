//! Clock module - the gravity tick source
//!
//! The session only ever tells a clock how often to tick; whoever owns the
//! main loop asks the clock whether a tick is due. [`FrameClock`] is the
//! `Instant`-based implementation used by the terminal binary.

use std::time::{Duration, Instant};

/// Receiver of gravity interval changes
pub trait Clock {
    /// Emit gravity ticks every `interval` from now on.
    ///
    /// A new interval restarts the schedule; time already elapsed toward the
    /// previous tick is not carried over.
    fn set_interval(&mut self, interval: Duration);
}

/// Gravity clock driven by `Instant` timestamps
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    next_due: Instant,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    /// Clock whose first tick is due one interval after `now`
    pub fn starting_at(interval: Duration, now: Instant) -> Self {
        assert!(!interval.is_zero(), "gravity interval must be positive");
        Self {
            interval,
            next_due: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval_at(&mut self, interval: Duration, now: Instant) {
        assert!(!interval.is_zero(), "gravity interval must be positive");
        self.interval = interval;
        self.next_due = now + interval;
    }

    /// Report whether a tick is due at `now`, scheduling the next one if so.
    ///
    /// At most one tick is reported per call; a stalled loop does not get a
    /// burst of catch-up ticks.
    pub fn poll_at(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now + self.interval;
        true
    }

    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }
}

impl Clock for FrameClock {
    fn set_interval(&mut self, interval: Duration) {
        self.set_interval_at(interval, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_once_per_interval() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(Duration::from_millis(100), t0);

        assert!(!clock.poll_at(t0 + Duration::from_millis(99)));
        assert!(clock.poll_at(t0 + Duration::from_millis(100)));
        assert!(!clock.poll_at(t0 + Duration::from_millis(150)));
        assert!(clock.poll_at(t0 + Duration::from_millis(200)));
    }

    #[test]
    fn test_stall_yields_single_tick() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(Duration::from_millis(10), t0);

        let late = t0 + Duration::from_millis(1000);
        assert!(clock.poll_at(late));
        assert!(!clock.poll_at(late));
    }

    #[test]
    fn test_new_interval_restarts_schedule() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(Duration::from_millis(100), t0);

        // 90ms into the old interval, speed up to 50ms.
        let t1 = t0 + Duration::from_millis(90);
        clock.set_interval_at(Duration::from_millis(50), t1);
        assert_eq!(clock.interval(), Duration::from_millis(50));

        // The old 100ms deadline no longer applies.
        assert!(!clock.poll_at(t0 + Duration::from_millis(100)));
        assert!(clock.poll_at(t1 + Duration::from_millis(50)));
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn test_zero_interval_panics() {
        let _ = FrameClock::new(Duration::ZERO);
    }
}
