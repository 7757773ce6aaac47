//! Lyrics.com scraper
//!
//! Pages live at `/<title>-lyrics-<artist>.html`.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::html::{extract_text, plain_ascii_punctuation, strip_lyrics};
use crate::providers::domain::ProviderError;
use crate::providers::http;
use crate::providers::traits::LyricsProvider;

static PUNCTUATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());
static SPACES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const START_MARKER: &str = "<div id=\"lyric_space\">";

const NOT_FOUND: [&str; 2] = ["Sorry, we do not have the lyric", "Submit Lyrics"];

/// Footer appended to every lyrics block
const FOOTER: &str = "\n---\nLyrics powered by";

pub struct LyricsCom {
    http_client: Option<reqwest::Client>,
    base_url: String,
}

impl LyricsCom {
    pub const NAME: &'static str = "Lyrics.com";

    pub fn new() -> Self {
        Self {
            http_client: None,
            base_url: "https://www.lyrics.com".to_string(),
        }
    }

    fn song_url(&self, title: &str, artist: &str) -> String {
        format!(
            "{}/{}-lyrics-{}.html",
            self.base_url,
            encode(title),
            encode(artist)
        )
    }
}

impl Default for LyricsCom {
    fn default() -> Self {
        Self::new()
    }
}

fn encode(text: &str) -> String {
    let ascii = plain_ascii_punctuation(text.trim());
    let cleaned = PUNCTUATION_RE.replace_all(&ascii, "");
    let dashed = SPACES_RE.replace_all(&cleaned, "-");
    urlencoding::encode(&dashed.to_lowercase()).into_owned()
}

pub fn parse_page(page: &str) -> Option<String> {
    let lyrics = strip_lyrics(&extract_text(page, START_MARKER)?);
    if NOT_FOUND.iter().any(|marker| lyrics.contains(marker)) {
        return None;
    }
    let lyrics = match lyrics.split_once(FOOTER) {
        Some((text, _)) => text.trim().to_string(),
        None => lyrics,
    };
    (!lyrics.is_empty()).then_some(lyrics)
}

#[async_trait]
impl LyricsProvider for LyricsCom {
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
            debug!("No Lyrics.com page at {}", url);
            return Ok(None);
        };
        Ok(parse_page(&page))
    }
}
