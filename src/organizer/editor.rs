//! Per-album edit pass: match files to tracks, rename, tag.
//!
//! One [`AlbumEditor`] handles one album directory. Every track is matched
//! against the files that are still unclaimed, renamed to its canonical
//! name and tagged with the album's metadata. Per-track problems never stop
//! the pass; they end up in the [`EditReport`].

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::error::Result;
use crate::matcher::CandidateSet;
use crate::metadata::{Artwork, TagFields, TagWriter, artwork_mime_type};
use crate::model::{Album, Track};
use crate::providers::LyricsProvider;
use crate::scanner::{AUDIO_EXTENSION, base_name, list_audio_files};

/// What an edit pass is allowed to do besides tagging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOptions {
    /// Rename matched files to `"{number} - {title}.mp3"`
    pub rename: bool,
    /// Look up and embed lyrics
    pub lyrics: bool,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            rename: true,
            lyrics: true,
        }
    }
}

/// Outcome of editing one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    pub track: Track,
    pub success: bool,
    /// Lyrics were found and embedded
    pub lyrics: bool,
    /// The file was renamed
    pub rename: bool,
    /// The file the track was matched to (after renaming)
    pub path: Option<PathBuf>,
}

impl EditResult {
    fn not_found(track: &Track) -> Self {
        Self {
            track: track.clone(),
            success: false,
            lyrics: false,
            rename: false,
            path: None,
        }
    }
}

impl fmt::Display for EditResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.success {
            return write!(f, "{}: Editing failed", self.track);
        }
        write!(f, "{}: Editing succeeded", self.track)?;
        if self.lyrics {
            write!(f, " with lyrics")?;
        }
        write!(f, ".")?;
        if self.rename {
            write!(f, " File was renamed")?;
        }
        Ok(())
    }
}

/// Results of a whole edit pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditReport {
    pub succeeded: Vec<EditResult>,
    pub failed: Vec<EditResult>,
    /// Base names of `.mp3` files that match no track, sorted
    pub orphans: Vec<String>,
}

impl EditReport {
    /// Tracks that could not be matched or tagged.
    pub fn failures(&self) -> &[EditResult] {
        &self.failed
    }

    /// Every track edited and no stray files left.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.orphans.is_empty()
    }
}

/// Edits the files of one album directory.
pub struct AlbumEditor<'a> {
    album: &'a Album,
    directory: PathBuf,
    tag_writer: &'a dyn TagWriter,
    lyrics_providers: &'a [Box<dyn LyricsProvider>],
    options: EditOptions,
}

impl<'a> AlbumEditor<'a> {
    pub fn new(
        album: &'a Album,
        directory: impl Into<PathBuf>,
        tag_writer: &'a dyn TagWriter,
        lyrics_providers: &'a [Box<dyn LyricsProvider>],
        options: EditOptions,
    ) -> Self {
        Self {
            album,
            directory: directory.into(),
            tag_writer,
            lyrics_providers,
            options,
        }
    }

    /// Fresh candidate set from the album directory.
    pub fn candidates(&self) -> Result<CandidateSet> {
        Ok(CandidateSet::new(list_audio_files(&self.directory)?))
    }

    /// Edit every track of the album, in album order.
    ///
    /// Fails only if the directory cannot be listed.
    pub async fn edit_tracks(&self) -> Result<EditReport> {
        let mut candidates = self.candidates()?;
        let mut report = EditReport::default();

        for track in self.album.tracks() {
            let result = self.edit_track(track, &mut candidates).await;
            if result.success {
                report.succeeded.push(result);
            } else {
                warn!("Track \"{}\" editing failed.", track);
                report.failed.push(result);
            }
        }

        report.orphans = self.find_orphans()?;
        for orphan in &report.orphans {
            warn!("File \"{}\" does not belong to the album.", orphan);
        }

        if !report.succeeded.is_empty() {
            info!("Successful tracks are:");
            for result in &report.succeeded {
                info!("{}", result);
            }
        }

        Ok(report)
    }

    /// Match, rename and tag a single track.
    ///
    /// The matched file is claimed from `candidates` right away, so no other
    /// track can get it.
    pub async fn edit_track(&self, track: &Track, candidates: &mut CandidateSet) -> EditResult {
        let Some(found) = candidates.take(track) else {
            return EditResult::not_found(track);
        };

        let (path, renamed) = if self.options.rename {
            self.rename_to_canonical(found, track)
        } else {
            (found, false)
        };

        let lyrics = if self.options.lyrics {
            self.find_lyrics(track).await
        } else {
            None
        };
        let has_lyrics = lyrics.is_some();

        let fields = self.tag_fields(track, lyrics);
        if let Err(e) = self.tag_writer.write_tags(&path, &fields) {
            error!("Failed to write tags for {}: {}", track, e);
            return EditResult {
                track: track.clone(),
                success: false,
                lyrics: false,
                rename: renamed,
                path: Some(path),
            };
        }

        debug!("Edited {:?}", path);
        EditResult {
            track: track.clone(),
            success: true,
            lyrics: has_lyrics,
            rename: renamed,
            path: Some(path),
        }
    }

    /// Base names of `.mp3` files that are not named after any track.
    pub fn find_orphans(&self) -> Result<Vec<String>> {
        Ok(list_audio_files(&self.directory)?
            .iter()
            .map(|path| base_name(path))
            .filter(|name| !self.album.has_track_named(name))
            .collect())
    }

    fn tag_fields(&self, track: &Track, lyrics: Option<String>) -> TagFields {
        TagFields {
            track_number: track.number(),
            title: track.title().to_string(),
            artist: self.album.artist().to_string(),
            album_artist: self.album.artist().to_string(),
            album: self.album.album_tag_for(track),
            genre: self.album.genre().map(str::to_string),
            year: self.album.year(),
            artwork: self.load_artwork(),
            lyrics,
        }
    }

    /// Rename `path` to the track's canonical name in the same directory.
    ///
    /// Returns the path the file ends up at and whether it moved.
    fn rename_to_canonical(&self, path: PathBuf, track: &Track) -> (PathBuf, bool) {
        let target = path.with_file_name(track.file_name(AUDIO_EXTENSION));
        if target == path {
            return (path, false);
        }

        if target.exists() && !is_same_file(&path, &target) {
            warn!(
                "Not renaming {:?}: {:?} already exists",
                path.file_name().unwrap_or_default(),
                target.file_name().unwrap_or_default()
            );
            return (path, false);
        }

        match std::fs::rename(&path, &target) {
            Ok(()) => {
                debug!("Renamed {:?} to {:?}", path, target);
                (target, true)
            }
            Err(e) => {
                warn!("Failed to rename {:?}: {}", path, e);
                (path, false)
            }
        }
    }

    /// Lyrics from the first provider that has any.
    async fn find_lyrics(&self, track: &Track) -> Option<String> {
        for provider in self.lyrics_providers {
            match provider
                .find_lyrics(track.title(), self.album.artist(), Some(self.album.name()))
                .await
            {
                Ok(Some(lyrics)) if !lyrics.trim().is_empty() => {
                    debug!("Found lyrics for {} using {}", track, provider.name());
                    return Some(lyrics);
                }
                Ok(_) => {
                    debug!(
                        "Lyrics for {} not found using {}. Trying next site.",
                        track,
                        provider.name()
                    );
                }
                Err(e) => {
                    warn!("Error occurred when using {}: {}", provider.name(), e);
                }
            }
        }
        None
    }

    fn load_artwork(&self) -> Option<Artwork> {
        let path = self.album.artwork_path()?;

        let Some(mime) = artwork_mime_type(path) else {
            warn!("Unsupported artwork type: {:?}", path);
            return None;
        };

        match std::fs::read(path) {
            Ok(data) => Some(Artwork { data, mime }),
            Err(e) => {
                warn!("Failed to read artwork {:?}: {}", path, e);
                None
            }
        }
    }
}

/// True when both paths resolve to the same file (case-only renames on
/// case-insensitive file systems).
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
