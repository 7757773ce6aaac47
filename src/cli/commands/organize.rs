//! Album organization command.

use anyhow::Context;
use clap::Args;
use std::fmt::Write as _;
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::metadata::LoftyTagWriter;
use crate::model::Album;
use crate::organizer::{self, EditOptions, EditReport, OrganizeOutcome, OrganizeRequest};
use crate::providers;

/// Arguments of the `organize` subcommand
#[derive(Args, Debug)]
pub struct OrganizeArgs {
    /// Album directory, laid out as <Artist>/<Album>
    pub path: PathBuf,
    /// Album name (default: the directory name)
    #[arg(short = 'b', long)]
    pub album: Option<String>,
    /// Artist name (default: the parent directory name)
    #[arg(short, long)]
    pub artist: Option<String>,
    /// Genre, replacing the one from the metadata provider
    #[arg(short, long)]
    pub genre: Option<String>,
    /// Release year, replacing the one from the metadata provider
    #[arg(short, long)]
    pub year: Option<u32>,
    /// Folder for downloaded album artwork
    #[arg(short, long)]
    pub image_dir: Option<PathBuf>,
    /// Metadata provider to try first (see `clients`)
    #[arg(short, long)]
    pub client: Option<String>,
    /// Lyrics site to try first (see `lyrics-sites`)
    #[arg(short, long)]
    pub lyrics_site: Option<String>,
    /// Keep the current file names
    #[arg(long)]
    pub no_rename: bool,
    /// Don't look up lyrics
    #[arg(long)]
    pub no_lyrics: bool,
}

impl OrganizeArgs {
    /// Merge the flags with the config file; flags win.
    pub fn to_request(&self, config: &Config) -> OrganizeRequest {
        let defaults = &config.organizer;
        OrganizeRequest {
            path: self.path.clone(),
            album: self.album.clone(),
            artist: self.artist.clone(),
            genre: self.genre.clone(),
            year: self.year,
            image_dir: self.image_dir.clone().or_else(|| config.artwork.folder.clone()),
            client: self.client.clone().or_else(|| defaults.preferred_client.clone()),
            lyrics_site: self
                .lyrics_site
                .clone()
                .or_else(|| defaults.preferred_lyrics_site.clone()),
            options: EditOptions {
                rename: defaults.rename && !self.no_rename,
                lyrics: defaults.lyrics && !self.no_lyrics,
            },
        }
    }
}

/// Look up the album and rename/tag its files
pub fn cmd_organize(rt: &Runtime, args: &OrganizeArgs, config: &Config) -> anyhow::Result<()> {
    let request = args.to_request(config);
    prepare_artwork_folder(args, &request)?;
    let metadata_providers = providers::default_metadata_providers(request.image_dir.clone());
    let lyrics_providers = providers::default_lyrics_providers();

    let outcome = rt.block_on(organizer::organize(
        &request,
        metadata_providers,
        lyrics_providers,
        &LoftyTagWriter,
    ))?;

    match outcome {
        OrganizeOutcome::AlbumNotFound => {
            anyhow::bail!("Album not found in {}", request.path.display())
        }
        OrganizeOutcome::Edited { album, report } => {
            print!("{}", format_report(&album, &report));
            Ok(())
        }
    }
}

/// Create the configured artwork folder on first use.
///
/// A folder given with `-i` must already exist; that is checked by the
/// organizer's validation.
fn prepare_artwork_folder(args: &OrganizeArgs, request: &OrganizeRequest) -> anyhow::Result<()> {
    if args.image_dir.is_some() {
        return Ok(());
    }
    if let Some(folder) = &request.image_dir {
        std::fs::create_dir_all(folder)
            .with_context(|| format!("Failed to create artwork folder {}", folder.display()))?;
    }
    Ok(())
}

/// Final report: successes, failures, then orphaned files.
fn format_report(album: &Album, report: &EditReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", album);
    let _ = writeln!(out);

    for result in &report.succeeded {
        let _ = writeln!(out, "✓ {}", result);
    }
    for result in &report.failed {
        let _ = writeln!(out, "✗ {}", result);
    }

    if !report.orphans.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Files matching no track:");
        for orphan in &report.orphans {
            let _ = writeln!(out, "  {}", orphan);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Completed: {} edited, {} failed, {} orphaned",
        report.succeeded.len(),
        report.failed.len(),
        report.orphans.len()
    );
    out
}
