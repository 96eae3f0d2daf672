//! Kiosk schedule display CLI library.
//!
//! This crate provides the `sked` binary's commands, renderers and the
//! poll-driven kiosk loop around `sked-core`.

mod cli;
pub mod command;
pub mod commands;
mod config;
pub mod kiosk;
pub mod render;

pub use cli::{Cli, Commands};
pub use config::{ClockMode, Config};
