//! Album organization flow.
//!
//! Given an album directory laid out as `<Artist>/<Album>/`, looks the album
//! up with the metadata providers and hands it to the [`AlbumEditor`], which
//! renames and tags the files.
//!
//! # Features
//! - Album and artist names inferred from the directory layout
//! - Provider preference without touching the default order
//! - Genre and year overrides
//! - Orphan file report

pub mod editor;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Error, Result, ResultExt};
use crate::metadata::TagWriter;
use crate::model::{Album, capitalize_words};
use crate::providers::{AlbumLookup, LyricsProvider, MetadataProvider, find_name, prefer};

pub use editor::{AlbumEditor, EditOptions, EditReport, EditResult};

/// Everything needed to organize one album directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizeRequest {
    /// Album directory
    pub path: PathBuf,
    /// Album name; inferred from the directory name when absent
    pub album: Option<String>,
    /// Artist name; inferred from the parent directory name when absent
    pub artist: Option<String>,
    /// Overrides the provider's genre
    pub genre: Option<String>,
    /// Overrides the provider's year
    pub year: Option<u32>,
    /// Folder for downloaded artwork
    pub image_dir: Option<PathBuf>,
    /// Metadata provider to try first
    pub client: Option<String>,
    /// Lyrics site to try first
    pub lyrics_site: Option<String>,
    pub options: EditOptions,
}

impl OrganizeRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            album: None,
            artist: None,
            genre: None,
            year: None,
            image_dir: None,
            client: None,
            lyrics_site: None,
            options: EditOptions::default(),
        }
    }
}

/// Result of [`organize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizeOutcome {
    /// No provider knew the album; no file was touched
    AlbumNotFound,
    /// The album was found and its files edited
    Edited { album: Album, report: EditReport },
}

/// Check a request before anything touches the network or the files.
///
/// Returns the canonical album directory.
pub fn validate(
    request: &OrganizeRequest,
    metadata_names: &[&str],
    lyrics_names: &[&str],
) -> Result<PathBuf> {
    if let Some(client) = &request.client {
        if find_name(metadata_names, client).is_none() {
            return Err(Error::unknown_provider("client", client));
        }
    }
    if let Some(site) = &request.lyrics_site {
        if find_name(lyrics_names, site).is_none() {
            return Err(Error::unknown_provider("lyrics site", site));
        }
    }

    if !request.path.is_dir() {
        return Err(Error::invalid_path(format!(
            "{} is not a directory",
            request.path.display()
        )));
    }
    if let Some(image_dir) = &request.image_dir {
        if !image_dir.is_dir() {
            return Err(Error::invalid_path(format!(
                "Image directory {} does not exist",
                image_dir.display()
            )));
        }
    }

    std::fs::canonicalize(&request.path)
        .with_context(format!("Failed to resolve {}", request.path.display()))
}

fn component_name(path: Option<&Path>) -> Option<String> {
    path.and_then(Path::file_name)
        .map(|name| name.to_string_lossy().trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Album name implied by the directory: its last component.
pub fn album_name_from_path(path: &Path) -> Result<String> {
    component_name(Some(path)).ok_or_else(|| {
        Error::invalid_path(format!("Cannot infer album name from {}", path.display()))
    })
}

/// Artist name implied by the directory: the name of its parent.
pub fn artist_name_from_path(path: &Path) -> Result<String> {
    component_name(path.parent()).ok_or_else(|| {
        Error::invalid_path(format!("Cannot infer artist name from {}", path.display()))
    })
}

/// Ask each provider in turn until one returns an album.
///
/// Providers are connected on first use. Lookup errors and unusable
/// answers are logged and the next provider is tried.
pub async fn find_album(
    providers: &mut [Box<dyn MetadataProvider>],
    album: &str,
    artist: Option<&str>,
) -> Option<Album> {
    for provider in providers.iter_mut() {
        let name = provider.name();

        if !provider.is_connected() {
            if let Err(e) = provider.connect().await {
                warn!("Could not connect to {}: {}", name, e);
                continue;
            }
        }

        info!("Searching for \"{}\" using {}", album, name);
        match provider.find_album(album, artist).await {
            Ok(AlbumLookup::Found(found)) => {
                info!("Album found using {}: {}", name, found);
                return Some(found);
            }
            Ok(AlbumLookup::NotFound) => info!("Album not found using {}", name),
            Ok(AlbumLookup::NotAnAlbum) => {
                warn!("{} returned a release that is not an album", name)
            }
            Ok(AlbumLookup::Malformed(reason)) => {
                warn!("{} returned a malformed album: {}", name, reason)
            }
            Err(e) => warn!("Error occurred when using {}: {}", name, e),
        }
    }
    None
}

/// Connect every lyrics site, dropping the ones that fail.
pub async fn connect_lyrics_providers(
    providers: Vec<Box<dyn LyricsProvider>>,
) -> Vec<Box<dyn LyricsProvider>> {
    let mut connected = Vec::with_capacity(providers.len());
    for mut provider in providers {
        if !provider.is_connected() {
            if let Err(e) = provider.connect().await {
                warn!("Could not connect to {}: {}", provider.name(), e);
                continue;
            }
        }
        connected.push(provider);
    }
    connected
}

/// Organize one album directory.
///
/// Validates the request, finds the album with the (preference-ordered)
/// metadata providers, applies overrides and runs the edit pass.
pub async fn organize(
    request: &OrganizeRequest,
    metadata_providers: Vec<Box<dyn MetadataProvider>>,
    lyrics_providers: Vec<Box<dyn LyricsProvider>>,
    tag_writer: &dyn TagWriter,
) -> Result<OrganizeOutcome> {
    let metadata_names: Vec<&'static str> = metadata_providers.iter().map(|p| p.name()).collect();
    let lyrics_names: Vec<&'static str> = lyrics_providers.iter().map(|p| p.name()).collect();
    let dir = validate(request, &metadata_names, &lyrics_names)?;

    let album_name = match &request.album {
        Some(album) => album.clone(),
        None => album_name_from_path(&dir)?,
    };
    let artist = match &request.artist {
        Some(artist) => artist.clone(),
        None => artist_name_from_path(&dir)?,
    };
    info!("Organizing \"{}\" by {} in {:?}", album_name, artist, dir);

    let mut metadata_providers =
        prefer(metadata_providers, request.client.as_deref(), |p| p.name());
    let Some(mut album) = find_album(&mut metadata_providers, &album_name, Some(&artist)).await
    else {
        warn!("Album \"{}\" by {} was not found", album_name, artist);
        return Ok(OrganizeOutcome::AlbumNotFound);
    };

    if let Some(genre) = &request.genre {
        album = album.with_genre(Some(capitalize_words(genre)));
    }
    if request.year.is_some() {
        album = album.with_year(request.year);
    }

    let lyrics_providers = if request.options.lyrics {
        connect_lyrics_providers(prefer(
            lyrics_providers,
            request.lyrics_site.as_deref(),
            |p| p.name(),
        ))
        .await
    } else {
        Vec::new()
    };

    let editor = AlbumEditor::new(&album, &dir, tag_writer, &lyrics_providers, request.options);
    let report = editor.edit_tracks().await?;

    Ok(OrganizeOutcome::Edited { album, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Track;
    use crate::providers::ProviderError;
    use crate::providers::mocks::{MockLyricsProvider, MockMetadataProvider};
    use crate::test_utils::{RecordingTagWriter, file_names, write_silent_mp3};
    use std::sync::atomic::Ordering;
    use tempfile::{TempDir, tempdir};

    /// `<tmp>/Artist/Album/` with foo.mp3 and bar.mp3
    fn library() -> (TempDir, PathBuf) {
        let root = tempdir().unwrap();
        let dir = root.path().join("Artist").join("Album");
        std::fs::create_dir_all(&dir).unwrap();
        write_silent_mp3(&dir.join("foo.mp3"));
        write_silent_mp3(&dir.join("bar.mp3"));
        (root, dir)
    }

    fn foo_bar_album() -> Album {
        Album::new(
            "Album",
            "Artist",
            vec![Track::new(1, "foo", None), Track::new(2, "bar", None)],
        )
    }

    fn request(dir: &Path) -> OrganizeRequest {
        OrganizeRequest {
            options: EditOptions {
                rename: true,
                lyrics: false,
            },
            ..OrganizeRequest::new(dir)
        }
    }

    #[test]
    fn test_names_from_path() {
        let path = Path::new("/music/Coldplay/Parachutes");
        assert_eq!(album_name_from_path(path).unwrap(), "Parachutes");
        assert_eq!(artist_name_from_path(path).unwrap(), "Coldplay");

        // Trailing separators don't change the components
        let path = Path::new("/music/Coldplay/Parachutes/");
        assert_eq!(album_name_from_path(path).unwrap(), "Parachutes");
    }

    #[test]
    fn test_names_from_root_fail() {
        assert!(matches!(
            album_name_from_path(Path::new("/")),
            Err(Error::InvalidPath(_))
        ));
        assert!(matches!(
            artist_name_from_path(Path::new("/Parachutes")),
            Err(Error::InvalidPath(_))
        ));
    }

    #[test]
    fn test_validate_unknown_names() {
        let (_root, dir) = library();

        let req = OrganizeRequest {
            client: Some("Napster".to_string()),
            ..request(&dir)
        };
        let err = validate(&req, &["MusicBrainz"], &["AZ Lyrics"]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown client 'Napster'");

        let req = OrganizeRequest {
            lyrics_site: Some("Genius".to_string()),
            ..request(&dir)
        };
        assert!(matches!(
            validate(&req, &["MusicBrainz"], &["AZ Lyrics"]),
            Err(Error::UnknownProvider { kind: "lyrics site", .. })
        ));

        let req = OrganizeRequest {
            client: Some("musicbrainz".to_string()),
            lyrics_site: Some("az lyrics".to_string()),
            ..request(&dir)
        };
        assert!(validate(&req, &["MusicBrainz"], &["AZ Lyrics"]).is_ok());
    }

    #[test]
    fn test_validate_paths() {
        let (root, dir) = library();

        let missing = request(&root.path().join("nope"));
        assert!(matches!(validate(&missing, &[], &[]), Err(Error::InvalidPath(_))));

        let req = OrganizeRequest {
            image_dir: Some(root.path().join("covers")),
            ..request(&dir)
        };
        assert!(matches!(validate(&req, &[], &[]), Err(Error::InvalidPath(_))));

        std::fs::create_dir(root.path().join("covers")).unwrap();
        assert_eq!(
            validate(&req, &[], &[]).unwrap(),
            std::fs::canonicalize(&dir).unwrap()
        );
    }

    #[tokio::test]
    async fn test_organize_end_to_end() {
        let (_root, dir) = library();
        let writer = RecordingTagWriter::new();
        let providers: Vec<Box<dyn MetadataProvider>> =
            vec![Box::new(MockMetadataProvider::found("Mock", foo_bar_album()))];

        let outcome = organize(&request(&dir), providers, vec![], &writer)
            .await
            .unwrap();

        let OrganizeOutcome::Edited { album, report } = outcome else {
            panic!("expected the album to be edited");
        };
        assert_eq!(album.name(), "Album");
        assert_eq!(report.succeeded.len(), 2);
        assert!(report.is_clean());
        assert_eq!(file_names(&dir), vec!["01 - Foo.mp3", "02 - Bar.mp3"]);
    }

    #[tokio::test]
    async fn test_album_not_found_touches_nothing() {
        let (_root, dir) = library();
        let writer = RecordingTagWriter::new();
        let providers: Vec<Box<dyn MetadataProvider>> = vec![
            Box::new(MockMetadataProvider::not_found("A")),
            Box::new(MockMetadataProvider::with_lookup("B", AlbumLookup::NotAnAlbum)),
            Box::new(MockMetadataProvider::with_lookup(
                "C",
                AlbumLookup::Malformed("no title".to_string()),
            )),
            Box::new(MockMetadataProvider::with_error("D", ProviderError::RateLimited)),
        ];

        let outcome = organize(&request(&dir), providers, vec![], &writer)
            .await
            .unwrap();

        assert_eq!(outcome, OrganizeOutcome::AlbumNotFound);
        assert!(writer.writes().is_empty());
        assert_eq!(file_names(&dir), vec!["bar.mp3", "foo.mp3"]);
    }

    #[tokio::test]
    async fn test_falls_through_to_next_provider() {
        let (_root, dir) = library();
        let writer = RecordingTagWriter::new();
        let unreachable = MockMetadataProvider::unreachable("Down");
        let down_calls = unreachable.counter();
        let providers: Vec<Box<dyn MetadataProvider>> = vec![
            Box::new(unreachable),
            Box::new(MockMetadataProvider::with_lookup("Odd", AlbumLookup::NotAnAlbum)),
            Box::new(MockMetadataProvider::found("Good", foo_bar_album())),
        ];

        let outcome = organize(&request(&dir), providers, vec![], &writer)
            .await
            .unwrap();

        assert!(matches!(outcome, OrganizeOutcome::Edited { .. }));
        assert_eq!(down_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_preferred_client_is_asked_first() {
        let (_root, dir) = library();
        let writer = RecordingTagWriter::new();
        let first = MockMetadataProvider::found("First", Album::new("Wrong", "Artist", vec![]));
        let first_calls = first.counter();
        let providers: Vec<Box<dyn MetadataProvider>> = vec![
            Box::new(first),
            Box::new(MockMetadataProvider::found("Second", foo_bar_album())),
        ];
        let req = OrganizeRequest {
            client: Some("second".to_string()),
            ..request(&dir)
        };

        let outcome = organize(&req, providers, vec![], &writer).await.unwrap();

        let OrganizeOutcome::Edited { album, .. } = outcome else {
            panic!("expected the album to be edited");
        };
        assert_eq!(album.name(), "Album");
        assert_eq!(first_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_overrides_applied() {
        let (_root, dir) = library();
        let writer = RecordingTagWriter::new();
        let providers: Vec<Box<dyn MetadataProvider>> =
            vec![Box::new(MockMetadataProvider::found("Mock", foo_bar_album()))];
        let req = OrganizeRequest {
            genre: Some("indie rock".to_string()),
            year: Some(1999),
            ..request(&dir)
        };

        organize(&req, providers, vec![], &writer).await.unwrap();

        let fields = writer.fields_for("01 - Foo.mp3").unwrap();
        assert_eq!(fields.genre.as_deref(), Some("Indie Rock"));
        assert_eq!(fields.year, Some(1999));
    }

    #[tokio::test]
    async fn test_preferred_lyrics_site_is_asked_first() {
        let (_root, dir) = library();
        let writer = RecordingTagWriter::new();
        let providers: Vec<Box<dyn MetadataProvider>> =
            vec![Box::new(MockMetadataProvider::found("Mock", foo_bar_album()))];
        let default_site = MockLyricsProvider::found("Default", "default words");
        let default_calls = default_site.counter();
        let lyrics: Vec<Box<dyn LyricsProvider>> = vec![
            Box::new(default_site),
            Box::new(MockLyricsProvider::found("Preferred", "preferred words")),
        ];
        let req = OrganizeRequest {
            lyrics_site: Some("Preferred".to_string()),
            options: EditOptions::default(),
            ..request(&dir)
        };

        organize(&req, providers, lyrics, &writer).await.unwrap();

        assert_eq!(default_calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            writer.fields_for("02 - Bar.mp3").unwrap().lyrics.as_deref(),
            Some("preferred words")
        );
    }

    #[tokio::test]
    async fn test_unknown_client_fails_before_lookup() {
        let (_root, dir) = library();
        let writer = RecordingTagWriter::new();
        let mock = MockMetadataProvider::found("Mock", foo_bar_album());
        let calls = mock.counter();
        let providers: Vec<Box<dyn MetadataProvider>> = vec![Box::new(mock)];
        let req = OrganizeRequest {
            client: Some("Napster".to_string()),
            ..request(&dir)
        };

        let result = organize(&req, providers, vec![], &writer).await;

        assert!(matches!(result, Err(Error::UnknownProvider { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_connect_lyrics_providers_keeps_order() {
        let providers: Vec<Box<dyn LyricsProvider>> = vec![
            Box::new(MockLyricsProvider::none("A")),
            Box::new(MockLyricsProvider::none("B")),
        ];
        let connected = connect_lyrics_providers(providers).await;
        let names: Vec<&str> = connected.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
