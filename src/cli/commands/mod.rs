//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `organize`: look up an album and rename/tag its files
//! - `menus`: list the registered providers
//! - `tags`: show the tags of one file
//! - `config`: show or create the config file

mod config;
mod menus;
mod organize;
mod tags;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

pub use config::cmd_config;
pub use menus::{cmd_clients, cmd_lyrics_sites};
pub use organize::{OrganizeArgs, cmd_organize};
pub use tags::cmd_tags;

/// MP3 album organizer
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Rename and tag the files of an album directory
    Organize(OrganizeArgs),
    /// List the metadata providers, in lookup order
    Clients,
    /// List the lyrics sites, in lookup order
    LyricsSites,
    /// Show the tags of an audio file
    Tags {
        /// Path to the audio file
        path: PathBuf,
    },
    /// Show the config file
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli, config: &crate::config::Config) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Organize(args) => {
            let rt = Runtime::new()?;
            cmd_organize(&rt, args, config)
        }
        Commands::Clients => cmd_clients(),
        Commands::LyricsSites => cmd_lyrics_sites(),
        Commands::Tags { path } => cmd_tags(path),
        Commands::Config { init } => cmd_config(config, *init),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_organize() {
        let cli = Cli::try_parse_from([
            "mp3-organizer",
            "-q",
            "organize",
            "/music/Coldplay/Parachutes",
            "-c",
            "itunes",
            "--no-lyrics",
        ])
        .unwrap();

        assert!(cli.quiet);
        let Commands::Organize(args) = cli.command else {
            panic!("expected organize");
        };
        assert_eq!(args.path, PathBuf::from("/music/Coldplay/Parachutes"));
        assert_eq!(args.client.as_deref(), Some("itunes"));
        assert!(args.no_lyrics);
        assert!(!args.no_rename);
    }

    #[test]
    fn test_parse_all_organize_flags() {
        let cli = Cli::try_parse_from([
            "mp3-organizer",
            "organize",
            "album",
            "-b",
            "Parachutes",
            "-a",
            "Coldplay",
            "-g",
            "rock",
            "-y",
            "2000",
            "-i",
            "/covers",
            "-l",
            "AZ Lyrics",
            "--no-rename",
        ])
        .unwrap();

        let Commands::Organize(args) = cli.command else {
            panic!("expected organize");
        };
        assert_eq!(args.album.as_deref(), Some("Parachutes"));
        assert_eq!(args.artist.as_deref(), Some("Coldplay"));
        assert_eq!(args.genre.as_deref(), Some("rock"));
        assert_eq!(args.year, Some(2000));
        assert_eq!(args.image_dir, Some(PathBuf::from("/covers")));
        assert_eq!(args.lyrics_site.as_deref(), Some("AZ Lyrics"));
        assert!(args.no_rename);
    }

    #[test]
    fn test_parse_rejects_bad_year() {
        assert!(Cli::try_parse_from(["mp3-organizer", "organize", "x", "-y", "soon"]).is_err());
    }

    #[test]
    fn test_parse_menus() {
        let cli = Cli::try_parse_from(["mp3-organizer", "lyrics-sites"]).unwrap();
        assert!(matches!(cli.command, Commands::LyricsSites));
        assert!(!cli.quiet);
    }
}
