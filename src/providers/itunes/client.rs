//! iTunes Search API client
//!
//! No API key required. Apple asks for roughly 20 calls per minute at most,
//! which one album lookup (two calls plus artwork) stays well under.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{adapter, dto};
use crate::providers::artwork::save_artwork;
use crate::providers::domain::{AlbumLookup, ProviderError};
use crate::providers::http;
use crate::providers::traits::MetadataProvider;

/// Number of album hits considered
const SEARCH_LIMIT: u32 = 10;

/// iTunes Store metadata provider
pub struct ItunesProvider {
    http_client: Option<reqwest::Client>,
    base_url: String,
    artwork_dir: Option<PathBuf>,
}

impl ItunesProvider {
    pub const NAME: &'static str = "iTunes";

    pub fn new(artwork_dir: Option<PathBuf>) -> Self {
        Self {
            http_client: None,
            base_url: "https://itunes.apple.com".to_string(),
            artwork_dir,
        }
    }

    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::new(None)
        }
    }

    fn search_url(&self, album: &str, artist: Option<&str>) -> String {
        let term = match artist {
            Some(artist) => format!("{} {}", artist, album),
            None => album.to_string(),
        };
        format!(
            "{}/search?term={}&media=music&entity=album&limit={}",
            self.base_url,
            urlencoding::encode(&term),
            SEARCH_LIMIT
        )
    }

    fn lookup_url(&self, collection_id: u64) -> String {
        format!("{}/lookup?id={}&entity=song", self.base_url, collection_id)
    }

    async fn fetch_artwork(
        &self,
        client: &reqwest::Client,
        collection: &dto::ItunesItem,
        album_name: &str,
    ) -> Option<PathBuf> {
        let dir = self.artwork_dir.as_ref()?;
        let url = adapter::artwork_url(collection)?;

        match http::get_bytes(client, &url).await {
            Ok(Some(data)) => save_artwork(dir, album_name, &data)
                .map_err(|e| warn!("{}", e))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to download artwork from {}: {}", url, e);
                None
            }
        }
    }
}

#[async_trait]
impl MetadataProvider for ItunesProvider {
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
            http::get_json::<dto::ItunesResponse>(client, &self.search_url(album, artist)).await?
        else {
            return Ok(AlbumLookup::NotFound);
        };

        let Some(collection_id) = adapter::pick_collection(&search.results, album, artist)
            .and_then(|c| c.collection_id)
        else {
            debug!("iTunes has no album named {}", album);
            return Ok(AlbumLookup::NotFound);
        };

        let Some(lookup) =
            http::get_json::<dto::ItunesResponse>(client, &self.lookup_url(collection_id)).await?
        else {
            return Ok(AlbumLookup::NotFound);
        };

        match adapter::to_album_lookup(&lookup.results) {
            AlbumLookup::Found(found) => {
                let collection = lookup
                    .results
                    .iter()
                    .find(|i| i.wrapper_type == dto::WRAPPER_COLLECTION);
                let artwork = match collection {
                    Some(c) => self.fetch_artwork(client, c, found.name()).await,
                    None => None,
                };
                Ok(AlbumLookup::Found(found.with_artwork(artwork)))
            }
            other => Ok(other),
        }
    }
}
