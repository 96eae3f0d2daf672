//! Reference-time collaborators.

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use crate::types::Instant;

/// Clock failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// No clock is connected, or it has never been set.
    #[error("clock unavailable")]
    Unavailable,
}

/// A source of the current instant that can also be set.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> Result<Instant, ClockError>;

    /// Sets the clock so that [`Clock::now`] continues from `instant`.
    fn set(&mut self, instant: Instant) -> Result<(), ClockError>;
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> Result<Instant, ClockError> {
        (**self).now()
    }

    fn set(&mut self, instant: Instant) -> Result<(), ClockError> {
        (**self).set(instant)
    }
}

/// The host clock, shifted by an in-memory offset adjusted by [`Clock::set`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset_secs: i64,
}

impl SystemClock {
    pub const fn new() -> Self {
        Self { offset_secs: 0 }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Result<Instant, ClockError> {
        Ok(Instant::from_secs(Utc::now().timestamp() + self.offset_secs))
    }

    fn set(&mut self, instant: Instant) -> Result<(), ClockError> {
        self.offset_secs = instant.as_secs() - Utc::now().timestamp();
        info!(offset_secs = self.offset_secs, "clock adjusted");
        Ok(())
    }
}

/// A clock that stands still at whatever it was last set to.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    current: Option<Instant>,
}

impl ManualClock {
    /// A clock reading `instant`.
    pub const fn at(instant: Instant) -> Self {
        Self {
            current: Some(instant),
        }
    }

    /// A clock that has not been set yet.
    pub const fn unset() -> Self {
        Self { current: None }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Result<Instant, ClockError> {
        self.current.ok_or(ClockError::Unavailable)
    }

    fn set(&mut self, instant: Instant) -> Result<(), ClockError> {
        self.current = Some(instant);
        Ok(())
    }
}

/// A missing clock: every read and write fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledClock;

impl Clock for DisabledClock {
    fn now(&self) -> Result<Instant, ClockError> {
        Err(ClockError::Unavailable)
    }

    fn set(&mut self, _instant: Instant) -> Result<(), ClockError> {
        Err(ClockError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_set_shifts_readings() {
        let mut clock = SystemClock::new();
        let target = Instant::from_secs(1_749_375_000);
        clock.set(target).unwrap();

        let now = clock.now().unwrap();
        assert!((now.as_secs() - target.as_secs()).abs() <= 2);
    }

    #[test]
    fn manual_clock_reads_what_was_set() {
        let mut clock = ManualClock::unset();
        assert_eq!(clock.now(), Err(ClockError::Unavailable));

        clock.set(Instant::from_secs(42)).unwrap();
        assert_eq!(clock.now(), Ok(Instant::from_secs(42)));
        assert_eq!(ManualClock::at(Instant::from_secs(7)).now(), Ok(Instant::from_secs(7)));
    }

    #[test]
    fn disabled_clock_rejects_everything() {
        let mut clock = DisabledClock;
        assert_eq!(clock.now(), Err(ClockError::Unavailable));
        assert_eq!(clock.set(Instant::from_secs(1)), Err(ClockError::Unavailable));
    }
}
