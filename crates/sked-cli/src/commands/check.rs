//! Check command: load the schedule and list what was parsed.

use std::io::Write;

use anyhow::Result;
use chrono::TimeZone;
use serde::Serialize;
use sked_core::time::format_full;
use sked_core::{Instant, LoadOutcome, LoadReport};

use crate::Config;

/// Shown instead of a date for a time field that did not parse.
const UNPARSEABLE: &str = "(unparseable)";

#[derive(Debug, Serialize)]
struct CheckedEvent {
    start: String,
    stop: String,
    label: String,
}

#[derive(Debug, Serialize)]
struct CheckOutput {
    source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    report: LoadReport,
    events: Vec<CheckedEvent>,
}

pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    config: &Config,
    tz: Tz,
    json: bool,
) -> Result<()> {
    let source = super::source(config);
    let mut engine = super::engine(config, tz)?;

    let (report, error) = match engine.reload(&source) {
        LoadOutcome::Loaded(report) => (report, None),
        LoadOutcome::Unavailable(err) => (LoadReport::default(), Some(err.to_string())),
    };

    let show = |instant: Instant| {
        if instant.is_unparseable() {
            UNPARSEABLE.to_string()
        } else {
            format_full(instant, engine.tz())
        }
    };
    let events = engine
        .store()
        .events()
        .iter()
        .map(|event| CheckedEvent {
            start: show(event.start),
            stop: show(event.stop),
            label: event.label.to_string(),
        })
        .collect();

    let output = CheckOutput {
        source: source.path().display().to_string(),
        error,
        report,
        events,
    };

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        write_text(writer, &output)?;
    }
    Ok(())
}

fn write_text<W: Write>(writer: &mut W, output: &CheckOutput) -> Result<()> {
    writeln!(writer, "Schedule: {}", output.source)?;
    if let Some(error) = &output.error {
        writeln!(writer, "Unavailable: {error}")?;
        return Ok(());
    }

    let report = output.report;
    writeln!(
        writer,
        "Rows: {} read, {} accepted, {} degraded, {} rejected",
        report.rows_read, report.accepted, report.degraded, report.rejected
    )?;
    for (index, event) in output.events.iter().enumerate() {
        writeln!(
            writer,
            "{:>3}. {} - {}  {}",
            index + 1,
            event.start,
            event.stop,
            event.label
        )?;
    }
    Ok(())
}
