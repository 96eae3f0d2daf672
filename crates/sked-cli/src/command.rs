//! Line commands accepted while the kiosk runs.
//!
//! - `YYYY/MM/DD HH:MM:SS` sets the clock (fixed width, all six fields)
//! - `reload` re-reads the schedule source

use std::sync::LazyLock;

use chrono::{NaiveDate, TimeZone};
use regex::Regex;
use sked_core::Instant;
use sked_core::time::instant_from_local;
use thiserror::Error;

/// The only accepted time-set layout.
pub const TIME_FORMAT: &str = "YYYY/MM/DD HH:MM:SS";

/// A well-formed time-set line.
pub const TIME_EXAMPLE: &str = "2025/06/14 08:30:00";

/// Pre-compiled regex for the time-set command.
static SET_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})/([0-9]{2})/([0-9]{2}) ([0-9]{2}):([0-9]{2}):([0-9]{2})$").unwrap()
});

/// A parsed command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetTime(Instant),
    Reload,
}

/// Rejected command lines.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Neither a command word nor the time-set layout.
    #[error(
        "unrecognized command {input:?}; expected {format} (e.g. {example}) or `reload`",
        format = TIME_FORMAT,
        example = TIME_EXAMPLE
    )]
    Malformed { input: String },

    /// Correct layout, but not a real calendar date-time.
    #[error("invalid date-time {input:?}")]
    InvalidTime { input: String },
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command<Tz: TimeZone>(line: &str, tz: &Tz) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if line == "reload" {
        return Ok(Some(Command::Reload));
    }
    parse_set_time(line, tz).map(|instant| Some(Command::SetTime(instant)))
}

/// Parses the strict `YYYY/MM/DD HH:MM:SS` layout into an instant in `tz`.
pub fn parse_set_time<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<Instant, CommandError> {
    let Some(caps) = SET_TIME_RE.captures(input) else {
        return Err(CommandError::Malformed {
            input: input.to_string(),
        });
    };

    let invalid = || CommandError::InvalidTime {
        input: input.to_string(),
    };
    let field = |i: usize| caps[i].parse::<u32>().map_err(|_| invalid());

    let year = i32::try_from(field(1)?).map_err(|_| invalid())?;
    let naive = NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)
        .and_then(|date| date.and_hms_opt(field(4).ok()?, field(5).ok()?, field(6).ok()?))
        .ok_or_else(invalid)?;

    instant_from_local(&naive, tz).ok_or_else(invalid)
}
