//! Saving downloaded cover images to the artwork folder.

use std::path::{Path, PathBuf};

use tracing::info;

use super::domain::ProviderError;
use crate::matcher::normalize;
use crate::model::capitalize_words;

/// File name used for an album's artwork: the normalized, word-capitalized
/// album name with a `.jpg` extension ("Parachutes.jpg").
pub fn artwork_file_name(album_name: &str) -> String {
    let stem = capitalize_words(&normalize(album_name));
    if stem.is_empty() {
        "Cover.jpg".to_string()
    } else {
        format!("{}.jpg", stem)
    }
}

/// Write `data` into `folder` under [`artwork_file_name`].
///
/// Creates the folder if needed. An existing file with the same name is
/// replaced.
pub fn save_artwork(folder: &Path, album_name: &str, data: &[u8]) -> Result<PathBuf, ProviderError> {
    std::fs::create_dir_all(folder).map_err(|e| ProviderError::Artwork(e.to_string()))?;

    let path = folder.join(artwork_file_name(album_name));
    std::fs::write(&path, data).map_err(|e| ProviderError::Artwork(e.to_string()))?;

    info!("Saved artwork for {} to {:?}", album_name, path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_artwork_file_name() {
        assert_eq!(artwork_file_name("Parachutes"), "Parachutes.jpg");
        assert_eq!(
            artwork_file_name("A Rush of Blood to the Head"),
            "A Rush Of Blood To The Head.jpg"
        );
        assert_eq!(artwork_file_name("X&Y"), "X Y.jpg");
        assert_eq!(artwork_file_name("???"), "Cover.jpg");
    }

    #[test]
    fn test_save_artwork_creates_folder() {
        let dir = tempdir().unwrap();
        let folder = dir.path().join("covers");

        let path = save_artwork(&folder, "Parachutes", &[1, 2, 3]).unwrap();

        assert_eq!(path, folder.join("Parachutes.jpg"));
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    }
}
