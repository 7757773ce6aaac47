//! Command-line interface for mp3-organizer.
//!
//! Organizes one album directory per invocation, plus a few helper
//! commands for discovering provider names and inspecting tags.

mod commands;

pub use commands::{Cli, Commands, run_command};
