//! Cover Art Archive client
//!
//! Fetches album artwork for MusicBrainz releases.
//! No API key required, but please respect their rate limits.
//!
//! API: https://coverartarchive.org

use super::domain::ProviderError;
use super::http;

/// Desired cover art size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoverSize {
    /// 250px thumbnail
    Small,
    /// 500px thumbnail (default)
    #[default]
    Medium,
    /// 1200px thumbnail
    Large,
}

impl CoverSize {
    fn suffix(self) -> &'static str {
        match self {
            CoverSize::Small => "-250",
            CoverSize::Medium => "-500",
            CoverSize::Large => "-1200",
        }
    }
}

/// Cover Art Archive client
#[derive(Debug, Clone)]
pub struct CoverArtClient {
    base_url: String,
}

impl CoverArtClient {
    /// Create a new client
    pub fn new() -> Self {
        Self {
            base_url: "https://coverartarchive.org".to_string(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// URL of the front cover of a release (the redirect endpoint)
    pub fn front_cover_url(&self, release_id: &str, size: CoverSize) -> String {
        format!("{}/release/{}/front{}", self.base_url, release_id, size.suffix())
    }

    /// Download the front cover. `Ok(None)` when the release has no art.
    pub async fn get_front_cover(
        &self,
        http_client: &reqwest::Client,
        release_id: &str,
        size: CoverSize,
    ) -> Result<Option<Vec<u8>>, ProviderError> {
        http::get_bytes(http_client, &self.front_cover_url(release_id, size)).await
    }
}

impl Default for CoverArtClient {
    fn default() -> Self {
        Self::new()
    }
}
