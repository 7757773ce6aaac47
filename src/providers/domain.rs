//! Provider-facing domain types.
//!
//! These types are OUR types - they don't change when an external API
//! changes. Every DTO gets converted into them by the provider's adapter.

use crate::model::Album;

/// Outcome of an album lookup.
///
/// Only [`AlbumLookup::Found`] carries data; every other variant tells the
/// organizer to move on to the next provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlbumLookup {
    /// A usable album with a non-empty track list
    Found(Album),
    /// The search returned nothing
    NotFound,
    /// The best result is not an album (single, video, empty release)
    NotAnAlbum,
    /// The provider answered with data we cannot turn into an album
    Malformed(String),
}

impl AlbumLookup {
    pub fn into_album(self) -> Option<Album> {
        match self {
            AlbumLookup::Found(album) => Some(album),
            _ => None,
        }
    }
}

/// Errors that can occur while talking to a provider
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}")]
    Http { status: u16 },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Provider used before connect()")]
    NotConnected,

    #[error("Failed to save artwork: {0}")]
    Artwork(String),
}
