//! Song Lyrics scraper
//!
//! Pages live at `/<artist>/<title>-lyrics/` with every non-alphanumeric
//! character turned into a dash.

use async_trait::async_trait;
use tracing::debug;

use super::html::{extract_text, plain_ascii_punctuation, strip_lyrics};
use crate::providers::domain::ProviderError;
use crate::providers::http;
use crate::providers::traits::LyricsProvider;

const START_MARKER: &str = "<div id=\"songLyricsDiv-outer\">";

/// Placeholder texts shown instead of lyrics
const NOT_FOUND: [&str; 2] = ["We do not have the lyrics", "Sorry, we have no"];

pub struct SongLyrics {
    http_client: Option<reqwest::Client>,
    base_url: String,
}

impl SongLyrics {
    pub const NAME: &'static str = "Song Lyrics";

    pub fn new() -> Self {
        Self {
            http_client: None,
            base_url: "https://www.songlyrics.com".to_string(),
        }
    }

    fn song_url(&self, title: &str, artist: &str) -> String {
        format!("{}/{}/{}-lyrics/", self.base_url, encode(artist), encode(title))
    }
}

impl Default for SongLyrics {
    fn default() -> Self {
        Self::new()
    }
}

fn encode(text: &str) -> String {
    let dashed: String = plain_ascii_punctuation(text.trim())
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    dashed
        .strip_suffix('-')
        .map(str::to_string)
        .unwrap_or(dashed)
}

pub fn parse_page(page: &str) -> Option<String> {
    let lyrics = strip_lyrics(&extract_text(page, START_MARKER)?);
    if lyrics.is_empty() || NOT_FOUND.iter().any(|marker| lyrics.contains(marker)) {
        return None;
    }
    Some(lyrics)
}

#[async_trait]
impl LyricsProvider for SongLyrics {
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
            debug!("No Song Lyrics page at {}", url);
            return Ok(None);
        };
        Ok(parse_page(&page))
    }
}
