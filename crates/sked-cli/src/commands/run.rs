//! Run command: the poll-driven display loop.
//!
//! A single-threaded tokio runtime multiplexes three inputs: the render
//! interval, stdin command lines, and Ctrl-C. Each branch runs to
//! completion before the next is polled, so reloads and renders never
//! overlap.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::TimeZone;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::Config;
use crate::kiosk::{Kiosk, usage};
use crate::render::{JsonRenderer, Renderer, TextRenderer};

/// Runs the kiosk until Ctrl-C.
pub fn run<Tz: TimeZone>(config: &Config, tz: Tz, json: bool, clear: bool) -> Result<()> {
    let renderer: Box<dyn Renderer> = if json {
        Box::new(JsonRenderer::new(std::io::stdout()))
    } else {
        Box::new(TextRenderer::new(std::io::stdout(), clear))
    };

    let mut kiosk = Kiosk::new(
        super::engine(config, tz)?,
        super::clock(config),
        super::source(config),
        renderer,
    );
    kiosk.start();
    writeln!(std::io::stderr(), "{}", usage())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    runtime.block_on(drive(kiosk, Duration::from_millis(config.tick_ms.max(1))))
}

async fn drive<Tz, C, S, R>(mut kiosk: Kiosk<Tz, C, S, R>, period: Duration) -> Result<()>
where
    Tz: TimeZone,
    C: sked_core::Clock,
    S: sked_core::ScheduleSource,
    R: Renderer,
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(?period, "display loop started");
    loop {
        tokio::select! {
            _ = interval.tick() => {
                kiosk.tick().context("failed to render frame")?;
            }
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => {
                    if let Some(reply) = kiosk.handle_line(&line) {
                        writeln!(std::io::stderr(), "{reply}")?;
                    }
                }
                Ok(None) => {
                    debug!("stdin closed, commands disabled");
                    stdin_open = false;
                }
                Err(err) => {
                    warn!(error = %err, "failed to read stdin, commands disabled");
                    stdin_open = false;
                }
            },
            result = &mut shutdown => {
                result.context("failed to listen for Ctrl-C")?;
                info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}
