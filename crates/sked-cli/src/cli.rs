//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Kiosk schedule display.
///
/// Shows the ongoing and upcoming events of a schedule file, refreshed
/// against a settable clock.
#[derive(Debug, Parser)]
#[command(name = "sked", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the display loop, reading commands from stdin.
    Run {
        /// Emit one JSON frame per tick instead of text.
        #[arg(long)]
        json: bool,

        /// Append frames instead of redrawing the screen.
        #[arg(long)]
        no_clear: bool,
    },

    /// Render a single frame and exit.
    Show {
        /// Reference time instead of the clock (YYYY/MM/DD HH:MM:SS).
        #[arg(long, value_name = "DATETIME")]
        at: Option<String>,

        /// Emit the frame as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Load the schedule file and list what was parsed.
    Check {
        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,
    },
}
