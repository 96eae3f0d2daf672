//! Schedule events parsed from the source file.

use serde::{Deserialize, Serialize};

use crate::types::{Instant, Label};

/// A time-bounded schedule entry.
///
/// `start <= stop` is not enforced. An inverted event can never be
/// ongoing and is upcoming only while its start is in the future.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Inclusive lower bound of the active window.
    pub start: Instant,
    /// Exclusive upper bound of the active window.
    pub stop: Instant,
    /// Free-form description.
    pub label: Label,
}

impl Event {
    pub const fn new(start: Instant, stop: Instant, label: Label) -> Self {
        Self { start, stop, label }
    }

    /// `start <= now < stop`.
    pub fn is_ongoing(&self, now: Instant) -> bool {
        self.start <= now && now < self.stop
    }

    /// `start > now`.
    pub fn is_upcoming(&self, now: Instant) -> bool {
        self.start > now
    }

    /// Whether either bound is the unparseable sentinel.
    pub const fn has_unparseable_time(&self) -> bool {
        self.start.is_unparseable() || self.stop.is_unparseable()
    }
}
