//! Time codec: schedule date-time strings to [`Instant`] and back.
//!
//! Input uses the loose `YYYY/M/D H:MM` form (one or two digit month, day
//! and hour; seconds optional). Fields are scanned positionally and never
//! range-checked: out-of-range values are normalised calendar-style, so
//! `2025/13/1 0:00` is January 1st 2026 and `2025/6/8 24:30` is 00:30 on
//! the 9th.
//!
//! Every function takes the zone used to interpret naive timestamps. The
//! binary passes [`chrono::Local`]; tests pin a [`chrono::FixedOffset`].

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use thiserror::Error;

use crate::types::Instant;

/// Rendered in place of instants chrono cannot represent.
const UNREPRESENTABLE_FULL: &str = "????/??/?? ??:??:??";
const UNREPRESENTABLE_HM: &str = "??:??";

/// Errors from parsing a schedule date-time string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Fewer than the five required integer fields were found.
    #[error("expected `YYYY/M/D H:MM`, scanned {found} of 5 fields in {input:?}")]
    Malformed { input: String, found: usize },

    /// The fields normalise to a date-time outside the supported range.
    #[error("date-time out of range: {input:?}")]
    OutOfRange { input: String },
}

/// Positional integer scanner with `sscanf("%d")` conventions.
struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    const fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    /// Leading whitespace and a single sign are accepted before the digits.
    fn int(&mut self) -> Option<i64> {
        let s = self.rest.trim_start();
        let bytes = s.as_bytes();
        let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
        let digits_start = end;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        if end == digits_start {
            return None;
        }
        let value = s[..end].parse().ok()?;
        self.rest = &s[end..];
        Some(value)
    }

    fn literal(&mut self, c: char) -> bool {
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }
}

/// Scans `Y/M/D H:M[:S]`, returning the fields or how many were found.
fn scan_fields(input: &str) -> Result<[i64; 6], usize> {
    let mut scanner = Scanner::new(input);
    let mut fields = [0_i64; 6];
    // Separator expected *before* each field; `None` is whitespace-only.
    let separators = [None, Some('/'), Some('/'), None, Some(':')];

    for (index, separator) in separators.into_iter().enumerate() {
        if let Some(c) = separator {
            if !scanner.literal(c) {
                return Err(index);
            }
        }
        fields[index] = scanner.int().ok_or(index)?;
    }

    if scanner.literal(':') {
        if let Some(seconds) = scanner.int() {
            fields[5] = seconds;
        }
    }

    Ok(fields)
}

/// Normalises possibly out-of-range fields the way `mktime` does.
fn normalize([year, month, day, hour, minute, second]: [i64; 6]) -> Option<NaiveDateTime> {
    let months = year.checked_mul(12)?.checked_add(month.checked_sub(1)?)?;
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    let month = u32::try_from(months.rem_euclid(12) + 1).ok()?;
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?.and_time(NaiveTime::MIN);

    let offset = Duration::try_days(day.checked_sub(1)?)?
        .checked_add(&Duration::try_hours(hour)?)?
        .checked_add(&Duration::try_minutes(minute)?)?
        .checked_add(&Duration::try_seconds(second)?)?;

    first_of_month.checked_add_signed(offset)
}

/// Resolves a naive local date-time in `tz`.
///
/// A folded time takes the earlier instant; a time inside a gap is moved
/// one hour forward.
fn resolve<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> Option<Instant> {
    let resolved = match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => {
            let shifted = naive.checked_add_signed(Duration::hours(1))?;
            tz.from_local_datetime(&shifted).earliest()?
        }
    };
    Some(Instant::from_secs(resolved.timestamp()))
}

/// Parses a schedule date-time string.
pub fn parse_instant<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<Instant, ParseError> {
    let fields = scan_fields(input).map_err(|found| ParseError::Malformed {
        input: input.to_string(),
        found,
    })?;

    normalize(fields)
        .and_then(|naive| resolve(&naive, tz))
        .ok_or_else(|| ParseError::OutOfRange {
            input: input.to_string(),
        })
}

/// Parses a schedule date-time string, degrading to [`Instant::UNPARSEABLE`].
pub fn parse_instant_lossy<Tz: TimeZone>(input: &str, tz: &Tz) -> Instant {
    parse_instant(input, tz).unwrap_or(Instant::UNPARSEABLE)
}

/// Converts a naive local date-time in `tz` to an instant, without normalisation.
pub fn instant_from_local<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> Option<Instant> {
    resolve(naive, tz)
}

/// Converts an instant to the wall-clock date-time it shows in `tz`.
pub fn to_local<Tz: TimeZone>(instant: Instant, tz: &Tz) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(instant.as_secs(), 0)
        .map(|utc| tz.from_utc_datetime(&utc.naive_utc()).naive_local())
}

/// Formats `YYYY/MM/DD HH:MM:SS`.
pub fn format_full<Tz: TimeZone>(instant: Instant, tz: &Tz) -> String {
    to_local(instant, tz).map_or_else(
        || UNREPRESENTABLE_FULL.to_string(),
        |local| local.format("%Y/%m/%d %H:%M:%S").to_string(),
    )
}

/// Formats `HH:MM`, 24-hour.
pub fn format_hm<Tz: TimeZone>(instant: Instant, tz: &Tz) -> String {
    to_local(instant, tz).map_or_else(
        || UNREPRESENTABLE_HM.to_string(),
        |local| local.format("%H:%M").to_string(),
    )
}

/// Formats a display range `HH:MM～HH:MM`.
pub fn format_range_compact<Tz: TimeZone>(start: Instant, stop: Instant, tz: &Tz) -> String {
    format!("{}～{}", format_hm(start, tz), format_hm(stop, tz))
}
