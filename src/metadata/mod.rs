//! Audio file tag reading and writing.
//!
//! Uses the lofty crate for format-independent tag access. The organizer
//! only ever handles MP3 files, so in practice this means ID3v2. Any other
//! tag found in the file (ID3v1, APEv2) is stripped on write.
//!
//! # Features
//! - Write the full standardized field set for an organized track
//! - Clear provider noise (comments, composer, grouping, disc, compilation
//!   flag, old artwork and lyrics) left by earlier taggers
//! - Embed front cover artwork and unsynchronized lyrics
//! - Read tags back for display and verification

use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey, Tag, TagExt, TagType};
use std::path::Path;

use crate::error::{Error, Result};

/// Image formats accepted as cover art.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtworkMime {
    Png,
    Jpeg,
}

impl ArtworkMime {
    fn to_lofty(self) -> MimeType {
        match self {
            ArtworkMime::Png => MimeType::Png,
            ArtworkMime::Jpeg => MimeType::Jpeg,
        }
    }
}

/// Map an artwork file's extension to its MIME type.
///
/// Returns `None` for anything but png, jpg and jpeg (case-insensitive).
pub fn artwork_mime_type(path: &Path) -> Option<ArtworkMime> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some(ArtworkMime::Png),
        "jpg" | "jpeg" => Some(ArtworkMime::Jpeg),
        _ => None,
    }
}

/// Cover image to embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artwork {
    pub data: Vec<u8>,
    pub mime: ArtworkMime,
}

/// The complete set of fields written for one organized track.
///
/// Every field is written on every edit; `None` clears the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFields {
    /// Zero-padded track number ("01")
    pub track_number: String,
    pub title: String,
    pub artist: String,
    pub album_artist: String,
    /// Album name, including the " CD n" suffix on multi-disc albums
    pub album: String,
    pub genre: Option<String>,
    pub year: Option<u32>,
    pub artwork: Option<Artwork>,
    pub lyrics: Option<String>,
}

/// Tag fields removed from every edited file.
const NOISE_KEYS: [ItemKey; 8] = [
    ItemKey::TrackTotal,
    ItemKey::Comment,
    ItemKey::Composer,
    ItemKey::ContentGroup,
    ItemKey::DiscNumber,
    ItemKey::DiscTotal,
    ItemKey::FlagCompilation,
    ItemKey::Lyrics,
];

/// Something that can persist [`TagFields`] to an audio file.
///
/// The organizer only talks to this trait so tests can record writes
/// without real audio files.
pub trait TagWriter: Send + Sync {
    fn write_tags(&self, path: &Path, fields: &TagFields) -> Result<()>;
}

/// [`TagWriter`] backed by lofty.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyTagWriter;

impl TagWriter for LoftyTagWriter {
    fn write_tags(&self, path: &Path, fields: &TagFields) -> Result<()> {
        let mut tagged_file = Probe::open(path)
            .map_err(|e| Error::metadata(path, format!("Failed to open file for writing: {}", e)))?
            .read()
            .map_err(|e| Error::metadata(path, format!("Failed to read file for tag writing: {}", e)))?;

        // Get the primary tag type for this format, or create one
        let tag_type = tagged_file.primary_tag_type();
        let stale: Vec<TagType> = tagged_file
            .tags()
            .iter()
            .map(|t| t.tag_type())
            .filter(|t| *t != tag_type)
            .collect();

        if tagged_file.tag(tag_type).is_none() {
            tagged_file.insert_tag(Tag::new(tag_type));
        }
        let tag = tagged_file
            .tag_mut(tag_type)
            .ok_or_else(|| Error::metadata(path, "Failed to create tag"))?;

        apply_fields(tag, fields);

        tag.save_to_path(path, WriteOptions::default())
            .map_err(|e| Error::metadata(path, format!("Failed to write tags to file: {}", e)))?;

        for stale_type in stale {
            stale_type.remove_from_path(path).map_err(|e| {
                Error::metadata(path, format!("Failed to remove {:?} tag: {}", stale_type, e))
            })?;
        }

        Ok(())
    }
}

fn apply_fields(tag: &mut Tag, fields: &TagFields) {
    for key in &NOISE_KEYS {
        tag.remove_key(key);
    }
    while !tag.pictures().is_empty() {
        tag.remove_picture(0);
    }

    tag.insert_text(ItemKey::TrackNumber, fields.track_number.clone());
    tag.set_title(fields.title.clone());
    tag.set_artist(fields.artist.clone());
    tag.insert_text(ItemKey::AlbumArtist, fields.album_artist.clone());
    tag.set_album(fields.album.clone());

    match &fields.genre {
        Some(genre) => tag.set_genre(genre.clone()),
        None => tag.remove_genre(),
    }
    match fields.year {
        Some(year) => tag.set_year(year),
        None => tag.remove_year(),
    }

    if let Some(artwork) = &fields.artwork {
        tag.push_picture(Picture::new_unchecked(
            PictureType::CoverFront,
            Some(artwork.mime.to_lofty()),
            Some("Cover".to_string()),
            artwork.data.clone(),
        ));
    }

    if let Some(lyrics) = &fields.lyrics {
        tag.insert_text(ItemKey::Lyrics, lyrics.clone());
    }
}

/// Tag values as read back from a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTags {
    pub track_number: Option<u32>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub year: Option<u32>,
    pub comment: Option<String>,
    pub lyrics: Option<String>,
    pub picture_count: usize,
}

/// Read the primary tag of an audio file.
///
/// A file without any tag yields empty [`FileTags`].
pub fn read_tags(path: &Path) -> Result<FileTags> {
    let tagged_file = Probe::open(path)
        .map_err(|e| Error::metadata(path, format!("Failed to open file for probing: {}", e)))?
        .read()
        .map_err(|e| Error::metadata(path, format!("Failed to read file metadata: {}", e)))?;

    let Some(tag) = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
    else {
        return Ok(FileTags::default());
    };

    Ok(FileTags {
        track_number: tag.track(),
        title: tag.title().map(|s| s.to_string()),
        artist: tag.artist().map(|s| s.to_string()),
        album_artist: tag.get_string(&ItemKey::AlbumArtist).map(str::to_string),
        album: tag.album().map(|s| s.to_string()),
        genre: tag.genre().map(|s| s.to_string()),
        year: tag.year(),
        comment: tag.comment().map(|s| s.to_string()),
        lyrics: tag.get_string(&ItemKey::Lyrics).map(str::to_string),
        picture_count: tag.pictures().len(),
    })
}
