//! The schedule engine: one owned value tying the store to its queries.

use chrono::TimeZone;
use tracing::{info, warn};

use crate::classify::{Capacity, Classification, classify};
use crate::clock::ClockError;
use crate::frame::{ErrorReason, Frame, FrameBody, Status};
use crate::projection::{Projection, build_projection};
use crate::record::{LoadReport, ParseOptions, parse_records};
use crate::source::{ScheduleSource, SourceError};
use crate::store::ScheduleStore;
use crate::time::format_full;
use crate::types::Instant;

/// Result of one [`ScheduleEngine::reload`].
#[derive(Debug)]
pub enum LoadOutcome {
    /// The source was read and parsed.
    Loaded(LoadReport),
    /// The source could not be read; the store was emptied.
    Unavailable(SourceError),
}

/// Owns the schedule store and answers classification queries.
#[derive(Debug)]
pub struct ScheduleEngine<Tz: TimeZone> {
    store: ScheduleStore,
    options: ParseOptions,
    capacity: Capacity,
    tz: Tz,
    storage_ok: bool,
}

impl<Tz: TimeZone> ScheduleEngine<Tz> {
    pub fn new(options: ParseOptions, capacity: Capacity, tz: Tz) -> Self {
        Self {
            store: ScheduleStore::new(),
            options,
            capacity,
            tz,
            storage_ok: false,
        }
    }

    /// Reloads from `source`. Never fails; unreadable sources degrade the
    /// storage status instead.
    ///
    /// A missing file on present storage leaves an empty, loaded store. Any
    /// other failure marks storage unavailable and unloads the store.
    pub fn reload<S: ScheduleSource + ?Sized>(&mut self, source: &S) -> LoadOutcome {
        match source.read_text() {
            Ok(text) => {
                self.storage_ok = true;
                let report = self.reload_text(&text);
                info!(
                    source = %source.describe(),
                    accepted = report.accepted,
                    degraded = report.degraded,
                    rejected = report.rejected,
                    "schedule loaded"
                );
                LoadOutcome::Loaded(report)
            }
            Err(err @ SourceError::NotFound { .. }) => {
                warn!(error = %err, "schedule file not found");
                self.storage_ok = true;
                self.store.replace(Vec::new());
                LoadOutcome::Unavailable(err)
            }
            Err(err) => {
                warn!(error = %err, "schedule storage unavailable");
                self.storage_ok = false;
                self.store.clear_unloaded();
                LoadOutcome::Unavailable(err)
            }
        }
    }

    /// Parses `text` and replaces the store with the result.
    pub fn reload_text(&mut self, text: &str) -> LoadReport {
        let parsed = parse_records(text, self.options, &self.tz);
        self.store.replace(parsed.events);
        parsed.report
    }

    pub fn classify(&self, now: Instant) -> Classification<'_> {
        classify(self.store.events(), now, self.capacity)
    }

    pub fn project(&self, now: Instant) -> Projection {
        build_projection(&self.classify(now), self.capacity, &self.tz)
    }

    /// Builds the render bundle for this tick.
    ///
    /// Without a reference time nothing is classified.
    pub fn frame(&self, reading: Result<Instant, ClockError>) -> Frame {
        let status = Status {
            clock_ok: reading.is_ok(),
            storage_ok: self.storage_ok,
            schedule_count: self.store.len(),
        };

        let body = match reading {
            Err(_) => FrameBody::Error(ErrorReason::ClockUnavailable),
            Ok(_) if !self.storage_ok => FrameBody::Error(ErrorReason::StorageUnavailable),
            Ok(_) if self.store.is_empty() => FrameBody::Error(ErrorReason::NoSchedulesFound),
            Ok(now) => FrameBody::Schedule(self.project(now)),
        };

        Frame {
            status,
            now: reading.ok().map(|now| format_full(now, &self.tz)),
            body,
        }
    }

    pub const fn store(&self) -> &ScheduleStore {
        &self.store
    }

    pub const fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub const fn tz(&self) -> &Tz {
        &self.tz
    }

    pub const fn storage_ok(&self) -> bool {
        self.storage_ok
    }
}
