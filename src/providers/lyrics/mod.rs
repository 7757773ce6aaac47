//! Lyrics sites
//!
//! Each site is scraped directly; none of them offers an API. Page layouts
//! change without notice, so parsing lives in small `parse_page` functions
//! tested against captured markup.

pub mod html;
mod azlyrics;
mod lyricscom;
mod songlyrics;

pub use azlyrics::AzLyrics;
pub use lyricscom::LyricsCom;
pub use songlyrics::SongLyrics;
