//! Show command: render a single frame and exit.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::TimeZone;
use sked_core::{Clock, ManualClock};

use crate::Config;
use crate::command::parse_set_time;
use crate::render::{JsonRenderer, Renderer, TextRenderer};

/// Renders one frame, at `at` if given, otherwise at the configured clock.
pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    config: &Config,
    tz: Tz,
    at: Option<&str>,
    json: bool,
) -> Result<()> {
    let clock: Box<dyn Clock> = match at {
        Some(at) => {
            let instant =
                parse_set_time(at, &tz).with_context(|| format!("invalid --at value {at:?}"))?;
            Box::new(ManualClock::at(instant))
        }
        None => super::clock(config),
    };

    let mut engine = super::engine(config, tz)?;
    engine.reload(&super::source(config));
    let frame = engine.frame(clock.now());

    if json {
        JsonRenderer::new(&mut *writer).render(&frame)?;
    } else {
        TextRenderer::new(&mut *writer, false).render(&frame)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use insta::assert_snapshot;
    use sked_core::{Frame, FrameBody};

    use super::*;
    use crate::ClockMode;

    fn config_with(schedule: &str) -> (tempfile::TempDir, Config) {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("schedule.csv");
        std::fs::write(&path, schedule).unwrap();
        let config = Config {
            schedule_path: path,
            ..Config::default()
        };
        (temp, config)
    }

    fn show(config: &Config, at: Option<&str>, json: bool) -> String {
        let mut output = Vec::new();
        run(&mut output, config, Utc, at, json).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn show_command_renders_schedule_at_given_time() {
        let (_temp, config) = config_with(
            "start,stop,action\n\
             2025/6/8 9:00,2025/6/8 10:00,会議\n\
             2025/6/8 14:00,2025/6/8 15:00,プレゼン\n",
        );

        assert_snapshot!(show(&config, Some("2025/06/08 09:30:00"), false), @r"
        Schedule display
        Now: 2025/06/08 09:30:00
        Clock:OK  Storage:OK  Schedules:2

        [Ongoing]
          09:00～10:00
          ・会議

        [Upcoming]
          14:00～15:00
          ・プレゼン
        ");
    }

    #[test]
    fn show_command_json_output() {
        let (_temp, config) = config_with("start,stop,action\n2025/6/8 9:00,2025/6/8 10:00,会議\n");
        let output = show(&config, Some("2025/06/08 10:00:00"), true);
        let frame: Frame = serde_json::from_str(output.trim()).unwrap();
        let FrameBody::Schedule(projection) = frame.body else {
            panic!("expected schedule body");
        };
        assert!(projection.ongoing.is_empty());
        assert!(projection.upcoming.is_empty());
    }

    #[test]
    fn show_command_with_disabled_clock_reports_clock_error() {
        let (_temp, mut config) = config_with("start,stop,action\n2025/6/8 9:00,2025/6/8 10:00,会議\n");
        config.clock = ClockMode::Disabled;
        let output = show(&config, None, false);
        assert!(output.contains("Clock:NG"));
        assert!(output.contains("CLOCK ERROR"));
    }

    #[test]
    fn show_command_rejects_loose_at_value() {
        let (_temp, config) = config_with("");
        let mut output = Vec::new();
        let err = run(&mut output, &config, Utc, Some("2025/6/8 9:30"), false).unwrap_err();
        assert_eq!(err.to_string(), "invalid --at value \"2025/6/8 9:30\"");
    }
}
