//! Capability interfaces for metadata and lyrics sources.
//!
//! The organizer only sees these traits, so tests substitute the mocks
//! below for the real HTTP-backed providers.
//!
//! # Example
//!
//! ```ignore
//! use mp3_organizer::providers::MetadataProvider;
//!
//! async fn lookup(provider: &mut dyn MetadataProvider) {
//!     provider.connect().await?;
//!     let lookup = provider.find_album("Parachutes", Some("Coldplay")).await?;
//! }
//! ```

use async_trait::async_trait;

use super::domain::{AlbumLookup, ProviderError};

/// A source of album metadata (track list, genre, year, artwork).
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Display name, also used for `--client` selection.
    fn name(&self) -> &'static str;

    /// Prepare the provider for lookups. Must be called before [`find_album`].
    ///
    /// [`find_album`]: MetadataProvider::find_album
    async fn connect(&mut self) -> Result<(), ProviderError>;

    fn is_connected(&self) -> bool;

    /// Look up an album by name, optionally narrowed down by artist.
    async fn find_album(
        &self,
        album: &str,
        artist: Option<&str>,
    ) -> Result<AlbumLookup, ProviderError>;
}

/// A source of song lyrics.
#[async_trait]
pub trait LyricsProvider: Send + Sync {
    /// Display name, also used for `--lyrics-site` selection.
    fn name(&self) -> &'static str;

    async fn connect(&mut self) -> Result<(), ProviderError>;

    fn is_connected(&self) -> bool;

    /// Fetch lyrics for one song. `Ok(None)` means the site has no lyrics
    /// for it, which is not an error.
    async fn find_lyrics(
        &self,
        title: &str,
        artist: &str,
        album: Option<&str>,
    ) -> Result<Option<String>, ProviderError>;
}
