//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::FixedOffset;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use sked_core::{Capacity, ParseOptions};

/// Which clock supplies the reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockMode {
    /// The host clock, adjustable with the time-set command.
    System,
    /// No clock; every frame reports the clock as unavailable.
    Disabled,
}

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the schedule file.
    pub schedule_path: PathBuf,
    /// Field delimiter; must be a single ASCII character.
    pub delimiter: char,
    /// Whether the schedule file starts with a header row.
    pub has_header: bool,
    /// Rows in the ongoing region.
    pub ongoing_capacity: usize,
    /// Rows in the upcoming region.
    pub upcoming_capacity: usize,
    /// Render period in milliseconds.
    pub tick_ms: u64,
    pub clock: ClockMode,
    /// Interpret times at this fixed UTC offset instead of the host zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("schedule_path", &self.schedule_path)
            .field("delimiter", &self.delimiter)
            .field("has_header", &self.has_header)
            .field("ongoing_capacity", &self.ongoing_capacity)
            .field("upcoming_capacity", &self.upcoming_capacity)
            .field("tick_ms", &self.tick_ms)
            .field("clock", &self.clock)
            .field("utc_offset_minutes", &self.utc_offset_minutes)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            schedule_path: data_dir.join("schedule.csv"),
            delimiter: ',',
            has_header: true,
            ongoing_capacity: 3,
            upcoming_capacity: 4,
            tick_ms: 1000,
            clock: ClockMode::System,
            utc_offset_minutes: None,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (SKED_*)
        figment = figment.merge(Env::prefixed("SKED_"));

        figment.extract()
    }

    /// Row-splitting options for the record parser.
    pub fn parse_options(&self) -> Result<ParseOptions> {
        if !self.delimiter.is_ascii() {
            bail!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            );
        }
        let mut buf = [0_u8; 1];
        self.delimiter.encode_utf8(&mut buf);
        Ok(ParseOptions {
            delimiter: buf[0],
            has_header: self.has_header,
        })
    }

    pub const fn capacity(&self) -> Capacity {
        Capacity {
            ongoing: self.ongoing_capacity,
            upcoming: self.upcoming_capacity,
        }
    }

    /// The pinned zone, if `utc_offset_minutes` is set.
    pub fn fixed_offset(&self) -> Result<Option<FixedOffset>> {
        self.utc_offset_minutes
            .map(|minutes| {
                minutes
                    .checked_mul(60)
                    .and_then(FixedOffset::east_opt)
                    .with_context(|| format!("utc_offset_minutes out of range: {minutes}"))
            })
            .transpose()
    }
}

/// Returns the platform-specific config directory for sked.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sked"))
}

/// Returns the platform-specific data directory for sked.
///
/// On Linux: `~/.local/share/sked`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("sked"))
}
