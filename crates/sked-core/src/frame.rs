//! The per-tick bundle handed to a renderer.

use serde::{Deserialize, Serialize};

use crate::projection::Projection;

/// Health of each collaborator at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub clock_ok: bool,
    pub storage_ok: bool,
    pub schedule_count: usize,
}

/// Why no schedule can be shown, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorReason {
    ClockUnavailable,
    StorageUnavailable,
    NoSchedulesFound,
}

/// Either the schedule rows or the reason they are missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameBody {
    Schedule(Projection),
    Error(ErrorReason),
}

/// Everything one render tick shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub status: Status,
    /// The reference instant in full format, absent when the clock failed.
    pub now: Option<String>,
    pub body: FrameBody,
}
