//! Config file command.

use crate::config::{self, Config};

/// Show where the config lives and what it contains
pub fn cmd_config(current: &Config, init: bool) -> anyhow::Result<()> {
    let Some(path) = config::config_path() else {
        anyhow::bail!("Could not determine config directory");
    };

    if init && !path.exists() {
        config::save_to(&Config::default(), &path)?;
        println!("Created {}", path.display());
    } else if path.exists() {
        println!("Config file: {}", path.display());
    } else {
        println!("No config file at {} (run with --init to create one)", path.display());
    }

    println!();
    print!("{}", toml::to_string_pretty(current)?);
    Ok(())
}
