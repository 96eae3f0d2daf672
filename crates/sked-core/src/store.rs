//! Schedule store: the current event sequence, replaced wholesale.
//!
//! The sequence lives behind an `Arc<[Event]>` snapshot. [`ScheduleStore::replace`]
//! builds the new snapshot completely before swapping it in, and readers that
//! took a [`ScheduleStore::snapshot`] keep the old one alive, so no reader
//! can observe a mix of two loads.

use std::sync::Arc;

use crate::event::Event;

/// Ordered events in source row order.
#[derive(Debug, Clone)]
pub struct ScheduleStore {
    events: Arc<[Event]>,
    loaded: bool,
}

impl Default for ScheduleStore {
    fn default() -> Self {
        Self {
            events: Arc::from(Vec::new()),
            loaded: false,
        }
    }
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole sequence. An empty `events` leaves the store
    /// loaded but empty.
    pub fn replace(&mut self, events: Vec<Event>) {
        self.events = Arc::from(events);
        self.loaded = true;
    }

    /// Drops all events and returns to the not-loaded state.
    pub fn clear_unloaded(&mut self) {
        self.events = Arc::from(Vec::new());
        self.loaded = false;
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// A shared handle to the current sequence.
    pub fn snapshot(&self) -> Arc<[Event]> {
        Arc::clone(&self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether any load has completed since creation or the last clear.
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }
}
