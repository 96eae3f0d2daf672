//! Renderers: where frames go each tick.

use std::io::{self, Write};

use sked_core::{ErrorReason, Frame, FrameBody, Projection, Row, Status};

use crate::command::{TIME_EXAMPLE, TIME_FORMAT};

const TITLE: &str = "Schedule display";

/// ANSI: clear screen, cursor home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Receives one [`Frame`] per render tick.
pub trait Renderer {
    fn render(&mut self, frame: &Frame) -> io::Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, frame: &Frame) -> io::Result<()> {
        (**self).render(frame)
    }
}

/// Human-readable frames for a terminal.
#[derive(Debug)]
pub struct TextRenderer<W> {
    writer: W,
    clear: bool,
}

impl<W: Write> TextRenderer<W> {
    /// With `clear`, each frame replaces the previous one on screen.
    pub const fn new(writer: W, clear: bool) -> Self {
        Self { writer, clear }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, frame: &Frame) -> io::Result<()> {
        if self.clear {
            write!(self.writer, "{CLEAR_SCREEN}")?;
        }
        write_frame(&mut self.writer, frame)?;
        self.writer.flush()
    }
}

/// One JSON object per line.
#[derive(Debug)]
pub struct JsonRenderer<W> {
    writer: W,
}

impl<W: Write> JsonRenderer<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, frame: &Frame) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, frame)?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}

/// Writes the text layout of `frame`.
pub fn write_frame<W: Write>(w: &mut W, frame: &Frame) -> io::Result<()> {
    writeln!(w, "{TITLE}")?;
    match &frame.now {
        Some(now) => writeln!(w, "Now: {now}")?,
        None => writeln!(w, "Now: clock not connected")?,
    }
    write_status(w, frame.status)?;
    writeln!(w)?;

    match &frame.body {
        FrameBody::Schedule(projection) => write_projection(w, projection),
        FrameBody::Error(reason) => write_error(w, *reason),
    }
}

fn write_status<W: Write>(w: &mut W, status: Status) -> io::Result<()> {
    let flag = |ok: bool| if ok { "OK" } else { "NG" };
    writeln!(
        w,
        "Clock:{}  Storage:{}  Schedules:{}",
        flag(status.clock_ok),
        flag(status.storage_ok),
        status.schedule_count
    )
}

fn write_rows<W: Write>(w: &mut W, rows: &[Row]) -> io::Result<()> {
    for row in rows {
        writeln!(w, "  {}", row.range_label)?;
        writeln!(w, "  ・{}", row.action)?;
    }
    Ok(())
}

fn write_projection<W: Write>(w: &mut W, projection: &Projection) -> io::Result<()> {
    writeln!(w, "[Ongoing]")?;
    if projection.ongoing.is_empty() {
        writeln!(w, "  No ongoing events.")?;
    }
    write_rows(w, &projection.ongoing)?;

    writeln!(w)?;
    writeln!(w, "[Upcoming]")?;
    if projection.upcoming.is_empty() {
        writeln!(w, "  No upcoming events.")?;
    }
    write_rows(w, &projection.upcoming)?;
    if projection.overflow > 0 {
        writeln!(w, "  ... and {} more", projection.overflow)?;
    }
    Ok(())
}

fn write_error<W: Write>(w: &mut W, reason: ErrorReason) -> io::Result<()> {
    match reason {
        ErrorReason::ClockUnavailable => {
            writeln!(w, "CLOCK ERROR")?;
            writeln!(w, "Set the time on stdin: {TIME_FORMAT}")?;
            writeln!(w, "Example: {TIME_EXAMPLE}")
        }
        ErrorReason::StorageUnavailable => {
            writeln!(w, "STORAGE ERROR")?;
            writeln!(w, "Check that the schedule storage is mounted.")
        }
        ErrorReason::NoSchedulesFound => {
            writeln!(w, "NO SCHEDULES")?;
            writeln!(w, "Check the schedule file:")?;
            writeln!(w, "- does the file exist")?;
            writeln!(w, "- is the CSV well-formed")
        }
    }
}
