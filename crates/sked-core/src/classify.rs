//! Classification of events relative to a reference instant.
//!
//! # Algorithm Summary
//!
//! One pass over the events in store order:
//!
//! 1. Events with an [`Instant::UNPARSEABLE`] bound are skipped and counted
//!    in neither total.
//! 2. `start <= now < stop` is ongoing; the first `capacity.ongoing` are kept.
//! 3. `start > now` is upcoming; the first `capacity.upcoming` are kept.
//! 4. Everything else (ended, or never valid) is dropped.
//!
//! Both sets keep store order and are never re-sorted by start time. The
//! totals before capping are returned alongside so callers can report
//! overflow.

use crate::event::Event;
use crate::types::Instant;

/// How many rows each display region can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub ongoing: usize,
    pub upcoming: usize,
}

impl Default for Capacity {
    fn default() -> Self {
        Self {
            ongoing: 3,
            upcoming: 4,
        }
    }
}

/// Events partitioned around one reference instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    /// Ongoing events, capped, in store order.
    pub ongoing: Vec<&'a Event>,
    /// Upcoming events, capped, in store order.
    pub upcoming: Vec<&'a Event>,
    /// Ongoing matches before capping.
    pub ongoing_total: usize,
    /// Upcoming matches before capping.
    pub upcoming_total: usize,
}

impl Classification<'_> {
    /// Upcoming matches that did not fit.
    pub const fn upcoming_overflow(&self) -> usize {
        self.upcoming_total.saturating_sub(self.upcoming.len())
    }

    /// Ongoing matches that did not fit.
    pub const fn ongoing_overflow(&self) -> usize {
        self.ongoing_total.saturating_sub(self.ongoing.len())
    }
}

/// Partitions `events` around `now`.
pub fn classify(events: &[Event], now: Instant, capacity: Capacity) -> Classification<'_> {
    let mut result = Classification {
        ongoing: Vec::with_capacity(capacity.ongoing.min(events.len())),
        upcoming: Vec::with_capacity(capacity.upcoming.min(events.len())),
        ongoing_total: 0,
        upcoming_total: 0,
    };

    for event in events {
        if event.has_unparseable_time() {
            continue;
        }
        if event.is_ongoing(now) {
            result.ongoing_total += 1;
            if result.ongoing.len() < capacity.ongoing {
                result.ongoing.push(event);
            }
        } else if event.is_upcoming(now) {
            result.upcoming_total += 1;
            if result.upcoming.len() < capacity.upcoming {
                result.upcoming.push(event);
            }
        }
    }

    result
}
