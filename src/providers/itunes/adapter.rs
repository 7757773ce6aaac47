//! Adapter layer: Convert iTunes DTOs to domain models

use super::dto::{self, ItunesItem};
use crate::matcher::normalize;
use crate::model::{Album, Track};
use crate::providers::domain::AlbumLookup;

/// Size requested when rewriting the artwork URL
const ARTWORK_SIZE: &str = "600x600";

fn is_collection(item: &ItunesItem) -> bool {
    item.wrapper_type == dto::WRAPPER_COLLECTION
}

fn is_song(item: &ItunesItem) -> bool {
    item.wrapper_type == dto::WRAPPER_TRACK && item.kind.as_deref() == Some("song")
}

/// Pick the collection that best matches the requested album.
///
/// The normalized collection name must equal the requested album. A
/// matching artist is preferred; no matching name gives `None`.
pub fn pick_collection<'a>(
    items: &'a [ItunesItem],
    album: &str,
    artist: Option<&str>,
) -> Option<&'a ItunesItem> {
    let wanted_album = normalize(album);
    let wanted_artist = artist.map(normalize);

    let mut titled = items.iter().filter(|i| {
        is_collection(i) && i.collection_name.as_deref().map(normalize).as_ref() == Some(&wanted_album)
    });
    let by_artist = titled.clone().find(|i| match &wanted_artist {
        Some(wanted) => i.artist_name.as_deref().map(normalize).as_ref() == Some(wanted),
        None => true,
    });

    by_artist.or_else(|| titled.next())
}

/// Convert a /lookup?entity=song response into an album.
pub fn to_album_lookup(items: &[ItunesItem]) -> AlbumLookup {
    let Some(collection) = items.iter().find(|i| is_collection(i)) else {
        return AlbumLookup::Malformed("lookup returned no collection".to_string());
    };

    if collection.collection_type.as_deref() != Some("Album") {
        return AlbumLookup::NotAnAlbum;
    }

    let (Some(name), Some(artist)) = (
        collection.collection_name.as_deref(),
        collection.artist_name.as_deref(),
    ) else {
        return AlbumLookup::Malformed("collection without name or artist".to_string());
    };

    let songs: Vec<&ItunesItem> = items.iter().filter(|i| is_song(i)).collect();
    if songs.is_empty() {
        return AlbumLookup::NotAnAlbum;
    }

    let multi_disc = songs.iter().any(|s| s.disc_count.unwrap_or(1) > 1);

    let mut numbered = Vec::with_capacity(songs.len());
    for song in songs {
        let (Some(number), Some(title)) = (song.track_number, song.track_name.as_deref()) else {
            return AlbumLookup::Malformed(format!("{} has a song without number or title", name));
        };
        let disc = song.disc_number.unwrap_or(1);
        numbered.push((disc, number, title));
    }
    numbered.sort_by_key(|&(disc, number, _)| (disc, number));

    let mut tracks = Vec::with_capacity(numbered.len());
    for (disc, number, title) in numbered {
        let disc_num = multi_disc.then_some(disc);
        match Track::try_new(number, title, disc_num) {
            Ok(t) => tracks.push(t),
            Err(e) => return AlbumLookup::Malformed(e.to_string()),
        }
    }

    let year = collection
        .release_date
        .as_deref()
        .and_then(|d| d.get(..4))
        .and_then(|y| y.parse().ok());

    AlbumLookup::Found(
        Album::new(name, artist, tracks)
            .with_genre(collection.primary_genre_name.clone())
            .with_year(year),
    )
}

/// Large artwork URL for a collection, if it has artwork at all.
pub fn artwork_url(collection: &ItunesItem) -> Option<String> {
    collection
        .artwork_url_100
        .as_deref()
        .map(|url| url.replace("100x100", ARTWORK_SIZE))
}
