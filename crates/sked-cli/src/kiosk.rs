//! The kiosk: engine, clock, source and renderer driven tick by tick.
//!
//! Everything here is synchronous. The `run` command decides when to call
//! [`Kiosk::tick`] and [`Kiosk::handle_line`]; a reload always finishes
//! before the next tick reads the store.

use std::fmt;
use std::io;

use chrono::TimeZone;
use sked_core::time::format_full;
use sked_core::{Clock, ClockError, LoadOutcome, LoadReport, ScheduleEngine, ScheduleSource};
use tracing::{debug, info, warn};

use crate::command::{Command, CommandError, TIME_EXAMPLE, TIME_FORMAT, parse_command};
use crate::render::Renderer;

/// Operator-facing answer to one command line.
#[derive(Debug)]
pub enum Reply {
    /// The clock now reads this (full format).
    ClockSet(String),
    ClockFailed(ClockError),
    Reloaded(LoadReport),
    ReloadFailed(String),
    Rejected(CommandError),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClockSet(now) => write!(f, "Clock set: {now}"),
            Self::ClockFailed(err) => write!(f, "Error: failed to set clock: {err}"),
            Self::Reloaded(report) => write!(
                f,
                "Reloaded: {} accepted, {} degraded, {} rejected",
                report.accepted, report.degraded, report.rejected
            ),
            Self::ReloadFailed(reason) => write!(f, "Error: reload failed: {reason}"),
            Self::Rejected(err) => write!(f, "Error: {err}"),
        }
    }
}

/// Usage lines shown once at startup.
pub fn usage() -> String {
    format!(
        "Set the clock by typing: {TIME_FORMAT}\nExample: {TIME_EXAMPLE}\nType `reload` to re-read the schedule."
    )
}

pub struct Kiosk<Tz: TimeZone, C, S, R> {
    engine: ScheduleEngine<Tz>,
    clock: C,
    source: S,
    renderer: R,
}

impl<Tz, C, S, R> Kiosk<Tz, C, S, R>
where
    Tz: TimeZone,
    C: Clock,
    S: ScheduleSource,
    R: Renderer,
{
    pub const fn new(engine: ScheduleEngine<Tz>, clock: C, source: S, renderer: R) -> Self {
        Self {
            engine,
            clock,
            source,
            renderer,
        }
    }

    /// Initial load, with a startup summary in the log.
    pub fn start(&mut self) -> LoadOutcome {
        match self.clock.now() {
            Ok(now) => info!(now = %format_full(now, self.engine.tz()), "clock ready"),
            Err(err) => warn!(error = %err, "clock not available"),
        }
        info!(source = %self.source.describe(), "loading schedule");
        let outcome = self.engine.reload(&self.source);
        info!(count = self.engine.store().len(), "schedule ready");
        outcome
    }

    /// Applies one input line. Blank lines produce no reply.
    pub fn handle_line(&mut self, line: &str) -> Option<Reply> {
        let command = match parse_command(line, self.engine.tz()) {
            Ok(Some(command)) => command,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "rejected command");
                return Some(Reply::Rejected(err));
            }
        };

        let reply = match command {
            Command::SetTime(instant) => match self.clock.set(instant) {
                Ok(()) => {
                    let shown = format_full(instant, self.engine.tz());
                    info!(now = %shown, "clock set");
                    Reply::ClockSet(shown)
                }
                Err(err) => {
                    warn!(error = %err, "clock set failed");
                    Reply::ClockFailed(err)
                }
            },
            Command::Reload => match self.engine.reload(&self.source) {
                LoadOutcome::Loaded(report) => Reply::Reloaded(report),
                LoadOutcome::Unavailable(err) => Reply::ReloadFailed(err.to_string()),
            },
        };
        Some(reply)
    }

    /// Reads the clock and renders one frame.
    pub fn tick(&mut self) -> io::Result<()> {
        let reading = self.clock.now();
        if let Err(err) = &reading {
            debug!(error = %err, "no reference time this tick");
        }
        let frame = self.engine.frame(reading);
        self.renderer.render(&frame)
    }

    pub const fn engine(&self) -> &ScheduleEngine<Tz> {
        &self.engine
    }

    pub const fn renderer(&self) -> &R {
        &self.renderer
    }
}
