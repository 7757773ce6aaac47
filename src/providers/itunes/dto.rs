//! iTunes Search API Data Transfer Objects
//!
//! These types match EXACTLY what the iTunes Search API returns.
//! DO NOT use these types outside the itunes module - convert to domain types.
//!
//! API Reference: https://performance-partners.apple.com/search-api
//!
//! Both /search and /lookup answer with the same envelope; the
//! `wrapperType` field tells collections (albums) and tracks apart.

use serde::{Deserialize, Serialize};

/// Response envelope of /search and /lookup
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItunesResponse {
    pub result_count: u32,
    #[serde(default)]
    pub results: Vec<ItunesItem>,
}

/// A collection or a track
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItunesItem {
    /// "collection", "track" or "artist"
    pub wrapper_type: String,
    /// "song", "music-video", ... (tracks only)
    pub kind: Option<String>,
    /// "Album" or "Compilation" (collections only)
    pub collection_type: Option<String>,
    pub collection_id: Option<u64>,
    pub collection_name: Option<String>,
    pub artist_name: Option<String>,
    /// 100px artwork; other sizes are obtained by rewriting the URL
    #[serde(rename = "artworkUrl100")]
    pub artwork_url_100: Option<String>,
    /// ISO 8601 timestamp
    pub release_date: Option<String>,
    pub primary_genre_name: Option<String>,
    pub track_name: Option<String>,
    pub track_number: Option<u32>,
    pub disc_number: Option<u32>,
    pub disc_count: Option<u32>,
}

pub const WRAPPER_COLLECTION: &str = "collection";
pub const WRAPPER_TRACK: &str = "track";

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// ============================================================================
