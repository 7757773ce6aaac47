//! Provider listing commands.

use crate::providers;

/// Print the metadata providers in lookup order
pub fn cmd_clients() -> anyhow::Result<()> {
    print!("{}", format_names(&providers::metadata_provider_names()));
    Ok(())
}

/// Print the lyrics sites in lookup order
pub fn cmd_lyrics_sites() -> anyhow::Result<()> {
    print!("{}", format_names(&providers::lyrics_provider_names()));
    Ok(())
}

fn format_names(names: &[&str]) -> String {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {}\n", i + 1, name))
        .collect()
}
