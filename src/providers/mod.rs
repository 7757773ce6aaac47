//! External metadata and lyrics sources.
//!
//! # Architecture
//!
//! Same split for every web service:
//! - **Domain types** (`domain.rs`) - what the organizer consumes
//! - **DTOs** (`musicbrainz/dto.rs`, `itunes/dto.rs`) - exact API response shapes
//! - **Adapters** - convert DTOs to domain types
//! - **Providers** - HTTP clients implementing the capability traits
//!
//! Lyrics sites have no API; their scrapers go straight from HTML to text.
//!
//! # Usage
//!
//! ```ignore
//! let providers = providers::prefer(
//!     providers::default_metadata_providers(Some(artwork_dir)),
//!     Some("iTunes"),
//!     |p| p.name(),
//! );
//! ```

pub mod artwork;
pub mod coverart;
pub mod domain;
pub mod http;
pub mod itunes;
pub mod lyrics;
pub mod musicbrainz;
pub mod traits;

use std::path::PathBuf;

pub use domain::{AlbumLookup, ProviderError};
pub use traits::{LyricsProvider, MetadataProvider};

#[cfg(test)]
pub use traits::mocks;

/// All metadata providers, in default lookup order.
///
/// Downloaded covers are written to `artwork_dir`; `None` skips artwork.
pub fn default_metadata_providers(artwork_dir: Option<PathBuf>) -> Vec<Box<dyn MetadataProvider>> {
    vec![
        Box::new(musicbrainz::MusicBrainzProvider::new(artwork_dir.clone())),
        Box::new(itunes::ItunesProvider::new(artwork_dir)),
    ]
}

/// All lyrics sites, in default lookup order.
pub fn default_lyrics_providers() -> Vec<Box<dyn LyricsProvider>> {
    vec![
        Box::new(lyrics::AzLyrics::new()),
        Box::new(lyrics::LyricsCom::new()),
        Box::new(lyrics::SongLyrics::new()),
    ]
}

/// Registered metadata provider names, in default order.
pub fn metadata_provider_names() -> Vec<&'static str> {
    vec![
        musicbrainz::MusicBrainzProvider::NAME,
        itunes::ItunesProvider::NAME,
    ]
}

/// Registered lyrics site names, in default order.
pub fn lyrics_provider_names() -> Vec<&'static str> {
    vec![
        lyrics::AzLyrics::NAME,
        lyrics::LyricsCom::NAME,
        lyrics::SongLyrics::NAME,
    ]
}

/// Find a registered name, ignoring ASCII case.
pub fn find_name<'a>(names: &[&'a str], wanted: &str) -> Option<&'a str> {
    names
        .iter()
        .find(|name| name.eq_ignore_ascii_case(wanted))
        .copied()
}

/// Move the item named `preferred` to the front, keeping the relative order
/// of everything else.
///
/// Unknown or absent names leave the list untouched.
pub fn prefer<T>(items: Vec<T>, preferred: Option<&str>, name: impl Fn(&T) -> &str) -> Vec<T> {
    let Some(preferred) = preferred else {
        return items;
    };
    let (mut front, back): (Vec<T>, Vec<T>) = items
        .into_iter()
        .partition(|item| name(item).eq_ignore_ascii_case(preferred));
    front.extend(back);
    front
}
