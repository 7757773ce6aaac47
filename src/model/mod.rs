//! Core data models for an album being organized.
//!
//! Defines [`Track`] and [`Album`], both built once from a metadata provider
//! response and immutable afterwards. Display forms here drive file naming:
//! a track renders as `"01 - Title"`, which is also the base name of the
//! renamed file on disk.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Characters that cannot appear in a file name on at least one target
/// platform. Path separators are handled separately (they become `" - "`).
const FORBIDDEN_CHARS: [char; 7] = ['?', ':', '*', '"', '<', '>', '|'];

/// Separator substituted for `/` and `\` in titles ("Part 1/Part 2").
const PART_SEPARATOR: &str = " - ";

/// Produce the canonical display title for a raw provider title.
///
/// Path separators become `" - "`, filename-hostile characters are dropped,
/// and the first letter of every word is upper-cased. Remaining letters are
/// kept as supplied so acronyms like "MTV" survive.
pub fn format_title(raw: &str) -> String {
    let replaced: String = raw
        .replace(['\\', '/'], PART_SEPARATOR)
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .collect();
    capitalize_words(&replaced)
}

/// Upper-case the first character of every space-delimited word.
///
/// Leading/trailing whitespace is trimmed and runs of spaces collapse to one.
pub fn capitalize_words(raw: &str) -> String {
    raw.trim()
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One canonical song entry of an album.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Track {
    ordinal: u32,
    title: String,
    disc_num: Option<u32>,
}

impl Track {
    /// Build a track from known-good values.
    ///
    /// Use [`Track::try_new`] for data coming from the outside world.
    pub fn new(ordinal: u32, raw_title: &str, disc_num: Option<u32>) -> Self {
        debug_assert!(ordinal > 0, "track ordinals start at 1");
        debug_assert!(disc_num != Some(0), "disc numbers start at 1");
        Self {
            ordinal,
            title: format_title(raw_title),
            disc_num,
        }
    }

    /// Build a track, rejecting zero ordinals and zero disc numbers.
    pub fn try_new(ordinal: u32, raw_title: &str, disc_num: Option<u32>) -> Result<Self> {
        if ordinal == 0 {
            return Err(Error::invalid_track(format!(
                "'{}' has track ordinal 0",
                raw_title
            )));
        }
        if disc_num == Some(0) {
            return Err(Error::invalid_track(format!(
                "'{}' has disc number 0",
                raw_title
            )));
        }
        Ok(Self::new(ordinal, raw_title, disc_num))
    }

    /// Zero-padded track number: `1` becomes `"01"`, `12` stays `"12"`.
    pub fn number(&self) -> String {
        format!("{:02}", self.ordinal)
    }

    /// Formatted display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Disc number, `None` on single-disc albums.
    pub fn disc_num(&self) -> Option<u32> {
        self.disc_num
    }

    /// File name for this track with the given extension (no leading dot).
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self, extension)
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.number(), self.title)
    }
}

/// An album as returned by a metadata provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    name: String,
    artist: String,
    genre: Option<String>,
    year: Option<u32>,
    artwork_path: Option<PathBuf>,
    tracks: Vec<Track>,
}

impl Album {
    /// Create an album. Name and artist are word-capitalized.
    ///
    /// `tracks` must already be in disc-then-ordinal order.
    pub fn new(name: &str, artist: &str, tracks: Vec<Track>) -> Self {
        Self {
            name: capitalize_words(name),
            artist: capitalize_words(artist),
            genre: None,
            year: None,
            artwork_path: None,
            tracks,
        }
    }

    pub fn with_genre(mut self, genre: Option<String>) -> Self {
        self.genre = genre;
        self
    }

    pub fn with_year(mut self, year: Option<u32>) -> Self {
        self.year = year;
        self
    }

    pub fn with_artwork(mut self, artwork_path: Option<PathBuf>) -> Self {
        self.artwork_path = artwork_path;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref()
    }

    pub fn year(&self) -> Option<u32> {
        self.year
    }

    pub fn artwork_path(&self) -> Option<&Path> {
        self.artwork_path.as_deref()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Value of the album tag for `track`: the album name, with a
    /// `" CD {n}"` suffix when the track belongs to a numbered disc.
    pub fn album_tag_for(&self, track: &Track) -> String {
        match track.disc_num() {
            Some(disc) => format!("{} CD {}", self.name, disc),
            None => self.name.clone(),
        }
    }

    /// True when `base_name` is the display string of one of the tracks.
    pub fn has_track_named(&self, base_name: &str) -> bool {
        self.tracks.iter().any(|t| t.to_string() == base_name)
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.name)
    }
}
