//! MusicBrainz HTTP client
//!
//! Handles communication with the MusicBrainz web service.
//! See: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! IMPORTANT: MusicBrainz requires a User-Agent header and rate limits to 1 req/sec.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::{adapter, dto};
use crate::providers::artwork::save_artwork;
use crate::providers::coverart::{CoverArtClient, CoverSize};
use crate::providers::domain::{AlbumLookup, ProviderError};
use crate::providers::http;
use crate::providers::traits::MetadataProvider;

/// Pause between the search and the lookup request
const RATE_LIMIT_PAUSE: Duration = Duration::from_millis(1100);

/// Number of search hits considered
const SEARCH_LIMIT: u32 = 5;

/// MusicBrainz metadata provider
pub struct MusicBrainzProvider {
    http_client: Option<reqwest::Client>,
    base_url: String,
    coverart: CoverArtClient,
    /// Where downloaded covers go; `None` disables artwork download
    artwork_dir: Option<PathBuf>,
}

impl MusicBrainzProvider {
    pub const NAME: &'static str = "MusicBrainz";

    /// Create a new provider. Call `connect()` before use.
    pub fn new(artwork_dir: Option<PathBuf>) -> Self {
        Self {
            http_client: None,
            base_url: "https://musicbrainz.org/ws/2".to_string(),
            coverart: CoverArtClient::new(),
            artwork_dir,
        }
    }

    /// Create a provider for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::new(None)
        }
    }

    fn search_url(&self, album: &str, artist: Option<&str>) -> String {
        let mut query = format!("release:\"{}\"", album);
        if let Some(artist) = artist {
            query.push_str(&format!(" AND artist:\"{}\"", artist));
        }
        format!(
            "{}/release?query={}&fmt=json&limit={}",
            self.base_url,
            urlencoding::encode(&query),
            SEARCH_LIMIT
        )
    }

    fn lookup_url(&self, release_id: &str) -> String {
        format!(
            "{}/release/{}?inc=recordings+artist-credits+genres&fmt=json",
            self.base_url, release_id
        )
    }

    /// Download the front cover and store it in the artwork folder.
    ///
    /// Failures are logged, never propagated: an album without artwork is
    /// still worth organizing.
    async fn fetch_artwork(
        &self,
        client: &reqwest::Client,
        release_id: &str,
        album_name: &str,
    ) -> Option<PathBuf> {
        let dir = self.artwork_dir.as_ref()?;

        match self
            .coverart
            .get_front_cover(client, release_id, CoverSize::Medium)
            .await
        {
            Ok(Some(data)) => match save_artwork(dir, album_name, &data) {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("{}", e);
                    None
                }
            },
            Ok(None) => {
                info!("No cover art for release {}", release_id);
                None
            }
            Err(e) => {
                warn!("Failed to download cover art for release {}: {}", release_id, e);
                None
            }
        }
    }
}

#[async_trait]
impl MetadataProvider for MusicBrainzProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn connect(&mut self) -> Result<(), ProviderError> {
        if self.http_client.is_none() {
            self.http_client = Some(http::build_client()?);
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.http_client.is_some()
    }

    async fn find_album(
        &self,
        album: &str,
        artist: Option<&str>,
    ) -> Result<AlbumLookup, ProviderError> {
        let client = self.http_client.as_ref().ok_or(ProviderError::NotConnected)?;

        let Some(search) =
            http::get_json::<dto::ReleaseSearchResponse>(client, &self.search_url(album, artist))
                .await?
        else {
            return Ok(AlbumLookup::NotFound);
        };

        let Some(summary) = adapter::pick_release(&search.releases, album, artist) else {
            debug!("MusicBrainz has no release named {}", album);
            return Ok(AlbumLookup::NotFound);
        };
        let release_id = summary.id.clone();
        debug!("Using MusicBrainz release {} ({})", release_id, summary.title);

        tokio::time::sleep(RATE_LIMIT_PAUSE).await;

        let Some(release) =
            http::get_json::<dto::ReleaseResponse>(client, &self.lookup_url(&release_id)).await?
        else {
            return Ok(AlbumLookup::NotFound);
        };

        match adapter::to_album_lookup(release) {
            AlbumLookup::Found(found) => {
                let artwork = self.fetch_artwork(client, &release_id, found.name()).await;
                Ok(AlbumLookup::Found(found.with_artwork(artwork)))
            }
            other => Ok(other),
        }
    }
}
