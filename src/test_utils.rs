//! Test utilities and fixtures for mp3-organizer tests.
//!
//! This module provides common test helpers, fixture files and a recording
//! tag writer to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{album_dir, sample_album};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let dir = album_dir(&["yellow.mp3"]);
//!     let album = sample_album();
//!     // ... test logic
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::TempDir;

use crate::error::{Error, Result};
use crate::metadata::{TagFields, TagWriter};
use crate::model::{Album, Track};

/// MPEG-1 Layer III, 128 kbit/s, 44.1 kHz, no padding, no CRC.
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];

/// Bytes per frame at that bitrate: 144 * 128000 / 44100
const FRAME_LEN: usize = 417;

const FRAME_COUNT: usize = 20;

/// Writes a short, silent, but perfectly valid MP3 file.
///
/// Enough for lofty to probe the file and read/write ID3v2 tags.
pub fn write_silent_mp3(path: &Path) {
    let mut data = Vec::with_capacity(FRAME_LEN * FRAME_COUNT);
    for _ in 0..FRAME_COUNT {
        data.extend_from_slice(&FRAME_HEADER);
        data.resize(data.len() + FRAME_LEN - FRAME_HEADER.len(), 0);
    }
    std::fs::write(path, data).expect("Failed to write test MP3");
}

/// Creates a temporary album directory holding silent MP3s with the given
/// file names.
///
/// Keep the TempDir alive for the duration of your test.
pub fn album_dir(file_names: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    for name in file_names {
        write_silent_mp3(&dir.path().join(name));
    }
    dir
}

/// A small single-disc album with sensible defaults.
pub fn sample_album() -> Album {
    Album::new(
        "Parachutes",
        "Coldplay",
        vec![
            Track::new(1, "Don't Panic", None),
            Track::new(2, "Shiver", None),
            Track::new(3, "Spies", None),
            Track::new(4, "Yellow", None),
        ],
    )
    .with_genre(Some("Rock".to_string()))
    .with_year(Some(2000))
}

/// Names of the files directly inside `dir`, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|e| e.expect("Failed to read entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Tag writer that records every write instead of touching files.
#[derive(Default)]
pub struct RecordingTagWriter {
    writes: Mutex<Vec<(PathBuf, TagFields)>>,
    /// Writes to files whose name contains this fail
    fail_on: Option<String>,
}

impl RecordingTagWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer that fails for files whose name contains `pattern`.
    pub fn failing_on(pattern: &str) -> Self {
        Self {
            fail_on: Some(pattern.to_string()),
            ..Self::default()
        }
    }

    /// Everything written so far, in order.
    pub fn writes(&self) -> Vec<(PathBuf, TagFields)> {
        self.writes.lock().expect("poisoned").clone()
    }

    /// Fields written to the file with the given name.
    pub fn fields_for(&self, file_name: &str) -> Option<TagFields> {
        self.writes()
            .into_iter()
            .find(|(path, _)| path.file_name().is_some_and(|n| n == file_name))
            .map(|(_, fields)| fields)
    }
}

impl TagWriter for RecordingTagWriter {
    fn write_tags(&self, path: &Path, fields: &TagFields) -> Result<()> {
        if let Some(pattern) = &self.fail_on {
            let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
            if name.is_some_and(|n| n.contains(pattern.as_str())) {
                return Err(Error::metadata(path, "simulated write failure"));
            }
        }
        self.writes
            .lock()
            .expect("poisoned")
            .push((path.to_path_buf(), fields.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lofty::file::{AudioFile, TaggedFileExt};

    #[test]
    fn test_silent_mp3_is_readable() {
        let dir = album_dir(&["silence.mp3"]);
        let tagged = lofty::read_from_path(dir.path().join("silence.mp3"))
            .expect("Silent MP3 should be readable");
        assert_eq!(tagged.file_type(), lofty::file::FileType::Mpeg);
        assert_eq!(tagged.properties().sample_rate(), Some(44100));
    }

    #[test]
    fn test_album_dir_creates_files() {
        let dir = album_dir(&["b.mp3", "a.mp3"]);
        assert_eq!(file_names(dir.path()), vec!["a.mp3", "b.mp3"]);
    }

    #[test]
    fn test_recording_writer() {
        let writer = RecordingTagWriter::failing_on("bad");
        let fields = TagFields {
            track_number: "01".to_string(),
            title: "A".to_string(),
            artist: "B".to_string(),
            album_artist: "B".to_string(),
            album: "C".to_string(),
            genre: None,
            year: None,
            artwork: None,
            lyrics: None,
        };

        writer.write_tags(Path::new("/x/good.mp3"), &fields).unwrap();
        assert!(writer.write_tags(Path::new("/x/bad.mp3"), &fields).is_err());
        assert_eq!(writer.writes().len(), 1);
        assert_eq!(writer.fields_for("good.mp3"), Some(fields));
    }
}
