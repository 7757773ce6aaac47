//! Adapter layer: Convert MusicBrainz DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! This isolates API changes - if MusicBrainz changes their response format,
//! only this file and dto.rs need to change.

use super::dto;
use crate::matcher::normalize;
use crate::model::{Album, Track, capitalize_words};
use crate::providers::domain::AlbumLookup;

/// Pick the search hit that best matches the requested album.
///
/// Only hits whose normalized title equals the requested album qualify.
/// Among those, artist matches come first and official album releases
/// before anything else. No qualifying hit gives `None`.
pub fn pick_release<'a>(
    releases: &'a [dto::ReleaseSummary],
    album: &str,
    artist: Option<&str>,
) -> Option<&'a dto::ReleaseSummary> {
    let wanted_album = normalize(album);
    let wanted_artist = artist.map(normalize);

    let titled: Vec<&dto::ReleaseSummary> = releases
        .iter()
        .filter(|r| normalize(&r.title) == wanted_album)
        .collect();
    let by_artist: Vec<&dto::ReleaseSummary> = titled
        .iter()
        .copied()
        .filter(|r| match &wanted_artist {
            Some(wanted) => {
                build_artist_string(&r.artist_credit).is_some_and(|a| normalize(&a) == *wanted)
            }
            None => true,
        })
        .collect();

    let pool = if by_artist.is_empty() { &titled } else { &by_artist };
    pool.iter()
        .find(|r| is_official_album(r))
        .or_else(|| pool.first())
        .copied()
}

fn is_official_album(release: &dto::ReleaseSummary) -> bool {
    release.status.as_deref() == Some("Official")
        && release
            .release_group
            .as_ref()
            .and_then(|rg| rg.primary_type.as_deref())
            == Some("Album")
}

/// Convert a release lookup into an album.
///
/// Releases without tracks are not albums; tracks without a position or
/// title make the whole response malformed.
pub fn to_album_lookup(release: dto::ReleaseResponse) -> AlbumLookup {
    let Some(title) = release.title.filter(|t| !t.trim().is_empty()) else {
        return AlbumLookup::Malformed(format!("release {} has no title", release.id));
    };

    let Some(artist) = build_artist_string(&release.artist_credit) else {
        return AlbumLookup::Malformed(format!("release {} has no artist credit", release.id));
    };

    if release.media.iter().all(|m| m.tracks.is_empty()) {
        return AlbumLookup::NotAnAlbum;
    }

    let multi_disc = release.media.len() > 1;
    let mut media: Vec<&dto::Medium> = release.media.iter().collect();
    media.sort_by_key(|m| m.position);

    let mut tracks = Vec::new();
    for (index, medium) in media.into_iter().enumerate() {
        // Only include disc number for multi-disc releases
        let disc_num = if multi_disc {
            Some(medium.position.unwrap_or(index as u32 + 1))
        } else {
            None
        };

        let mut medium_tracks: Vec<&dto::Track> = medium.tracks.iter().collect();
        medium_tracks.sort_by_key(|t| t.position);

        for track in medium_tracks {
            let (Some(position), Some(track_title)) = (track.position, track.title.as_deref())
            else {
                return AlbumLookup::Malformed(format!(
                    "release {} has a track without position or title",
                    release.id
                ));
            };
            match Track::try_new(position, track_title, disc_num) {
                Ok(t) => tracks.push(t),
                Err(e) => return AlbumLookup::Malformed(e.to_string()),
            }
        }
    }

    let album = Album::new(&title, &artist, tracks)
        .with_genre(extract_genre(&release.genres))
        .with_year(extract_year(release.date.as_deref()));

    AlbumLookup::Found(album)
}

/// Build a combined artist string from artist credits
fn build_artist_string(credits: &[dto::ArtistCredit]) -> Option<String> {
    if credits.is_empty() {
        return None;
    }

    let mut result = String::new();
    for credit in credits {
        // Use credited name if available, otherwise official name
        let name = credit.name.as_ref().unwrap_or(&credit.artist.name);
        result.push_str(name);

        // Add join phrase if present (e.g., " & ", " feat. ")
        if let Some(ref join) = credit.joinphrase {
            result.push_str(join);
        }
    }

    Some(result)
}

/// Parse year from date (YYYY, YYYY-MM, or YYYY-MM-DD)
fn extract_year(date: Option<&str>) -> Option<u32> {
    date.and_then(|d| d.split('-').next())
        .and_then(|y| y.parse().ok())
}

/// The most-voted genre, word-capitalized
fn extract_genre(genres: &[dto::Genre]) -> Option<String> {
    genres
        .iter()
        .filter(|g| g.count > 0)
        .max_by_key(|g| g.count)
        .map(|g| capitalize_words(&g.name))
}
