//! Schedule interval engine for the kiosk schedule display.
//!
//! This crate contains the logic between the raw schedule file and the
//! screen:
//! - Time codec: `YYYY/M/D H:MM` strings to instants and display formats
//! - Record parsing: delimited rows to validated events
//! - Classification: ongoing and upcoming events around a reference instant
//! - Projection: capped display rows with an overflow count
//!
//! Clock, storage and display are reached through the [`Clock`] and
//! [`ScheduleSource`] traits and the [`Frame`] bundle.

mod classify;
pub mod clock;
mod engine;
mod event;
mod frame;
mod projection;
pub mod record;
pub mod source;
mod store;
pub mod time;
mod types;

pub use classify::{Capacity, Classification, classify};
pub use clock::{Clock, ClockError, DisabledClock, ManualClock, SystemClock};
pub use engine::{LoadOutcome, ScheduleEngine};
pub use event::Event;
pub use frame::{ErrorReason, Frame, FrameBody, Status};
pub use projection::{Projection, Row, build_projection};
pub use record::{LoadReport, ParseOptions, ParsedSchedule, parse_records};
pub use source::{FileSource, ScheduleSource, SourceError, StaticSource};
pub use store::ScheduleStore;
pub use time::ParseError;
pub use types::{Instant, Label, ValidationError};
