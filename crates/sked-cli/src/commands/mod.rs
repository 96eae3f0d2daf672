//! CLI subcommand implementations.

pub mod check;
pub mod run;
pub mod show;

use anyhow::Result;
use chrono::TimeZone;
use sked_core::{Clock, DisabledClock, FileSource, ScheduleEngine, SystemClock};

use crate::{ClockMode, Config};

/// Builds an engine from the configured parse options and capacities.
pub fn engine<Tz: TimeZone>(config: &Config, tz: Tz) -> Result<ScheduleEngine<Tz>> {
    Ok(ScheduleEngine::new(
        config.parse_options()?,
        config.capacity(),
        tz,
    ))
}

/// The configured schedule file.
pub fn source(config: &Config) -> FileSource {
    FileSource::new(&config.schedule_path)
}

/// The configured clock.
pub fn clock(config: &Config) -> Box<dyn Clock> {
    match config.clock {
        ClockMode::System => Box::new(SystemClock::new()),
        ClockMode::Disabled => Box::new(DisabledClock),
    }
}
