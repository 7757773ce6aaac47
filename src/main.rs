//! mp3-organizer - rename and tag the files of an album directory.
//!
//! Looks the album up with online metadata providers, matches the loosely
//! named local files to the canonical track list, renames them to
//! "NN - Title.mp3" and writes standardized tags, artwork and lyrics.

pub mod cli;
pub mod config;
pub mod error;
pub mod matcher;
pub mod metadata;
pub mod model;
pub mod organizer;
pub mod providers;
pub mod scanner;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    let config = config::load();

    // Initialize logging
    let directives = log_directives(
        args.quiet,
        &config,
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    );
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::try_new(directives)?)
        .init();

    cli::run_command(&args, &config)
}

/// Filter directives: `RUST_LOG` when set, else `--quiet`, else the config
/// file's filter, else info for this crate.
fn log_directives(quiet: bool, config: &config::Config, rust_log: Option<String>) -> String {
    if let Some(env) = rust_log.filter(|v| !v.trim().is_empty()) {
        return env;
    }
    if quiet {
        return "mp3_organizer=warn".to_string();
    }
    config
        .logging
        .filter
        .clone()
        .unwrap_or_else(|| "mp3_organizer=info".to_string())
}
