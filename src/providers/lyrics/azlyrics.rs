//! AZ Lyrics scraper
//!
//! Pages live at `/lyrics/<artist>/<title>.html`, both parts reduced to
//! lower-case letters and digits.

use async_trait::async_trait;
use tracing::debug;

use super::html::{extract_text, plain_ascii_punctuation, strip_lyrics};
use crate::providers::domain::ProviderError;
use crate::providers::http;
use crate::providers::traits::LyricsProvider;

/// Comment that opens the lyrics block on every song page
const START_MARKER: &str = "<!-- Usage of azlyrics.com content by any third-party lyrics provider is prohibited by our licensing agreement. Sorry about that. -->";

pub struct AzLyrics {
    http_client: Option<reqwest::Client>,
    base_url: String,
}

impl AzLyrics {
    pub const NAME: &'static str = "AZ Lyrics";

    pub fn new() -> Self {
        Self {
            http_client: None,
            base_url: "https://www.azlyrics.com".to_string(),
        }
    }

    fn song_url(&self, title: &str, artist: &str) -> String {
        format!(
            "{}/lyrics/{}/{}.html",
            self.base_url,
            encode_artist(artist),
            encode(title)
        )
    }
}

impl Default for AzLyrics {
    fn default() -> Self {
        Self::new()
    }
}

fn encode(text: &str) -> String {
    plain_ascii_punctuation(text)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// The site files "The Killers" under "killers".
fn encode_artist(artist: &str) -> String {
    let trimmed = artist.trim();
    let without_article = match trimmed.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("the ") => &trimmed[4..],
        _ => trimmed,
    };
    encode(without_article)
}

/// Lyrics from a song page, if the page has any.
pub fn parse_page(page: &str) -> Option<String> {
    let lyrics = strip_lyrics(&extract_text(page, START_MARKER)?);
    (!lyrics.is_empty()).then_some(lyrics)
}

#[async_trait]
impl LyricsProvider for AzLyrics {
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

    async fn find_lyrics(
        &self,
        title: &str,
        artist: &str,
        _album: Option<&str>,
    ) -> Result<Option<String>, ProviderError> {
        let client = self.http_client.as_ref().ok_or(ProviderError::NotConnected)?;
        let url = self.song_url(title, artist);

        let Some(page) = http::get_text(client, &url).await? else {
            debug!("No AZ Lyrics page at {}", url);
            return Ok(None);
        };
        Ok(parse_page(&page))
    }
}
