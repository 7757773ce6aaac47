//! Track-to-file matching.
//!
//! Local files are named loosely ("01-yellow.mp3", "Coldplay - Yellow
//! (bonus).mp3", "yellow.MP3"), so both the file stem and the track title
//! are reduced to a token form by [`normalize`] before comparison. A file is
//! a candidate for a track when the title's tokens appear as a contiguous
//! run of whole tokens in the file's tokens. Among candidates the shortest
//! file name wins, then the lexicographically smallest path.
//!
//! Track numbers are deliberately never used for matching: they collide too
//! easily with years, disc numbers and track counts embedded in file names.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::model::Track;

/// Canonicalize text for tolerant comparison.
///
/// Every character that is not an ASCII letter or digit becomes a space, the
/// result is lower-cased and whitespace runs collapse to single spaces.
/// Total and idempotent; the empty string maps to itself.
pub fn normalize(text: &str) -> String {
    tokens(text).join(" ")
}

/// The token sequence [`normalize`] joins.
pub fn tokens(text: &str) -> Vec<String> {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// True when `needle` occurs as a contiguous run of whole tokens in `haystack`.
///
/// An empty needle never matches: a title made only of punctuation would
/// otherwise claim an arbitrary file.
fn contains_words(haystack: &[String], needle: &[String]) -> bool {
    if needle.is_empty() || needle.len() > haystack.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_name_len(path: &Path) -> usize {
    path.file_name()
        .map(|s| s.to_string_lossy().chars().count())
        .unwrap_or(0)
}

/// Find the file that best matches `track` among `candidates`.
///
/// Returns `None` when no candidate contains the normalized title as whole
/// words. The result is independent of the iteration order of `candidates`.
pub fn find_track<'a, I>(track: &Track, candidates: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = &'a Path>,
{
    let title = tokens(track.title());

    let best = candidates
        .into_iter()
        .filter(|path| contains_words(&tokens(&file_stem(path)), &title))
        .min_by_key(|path| (file_name_len(path), path.to_string_lossy().into_owned()));

    match best {
        Some(path) => {
            debug!("Found track {} by its name: {:?}", track, path);
            Some(path.to_path_buf())
        }
        None => {
            warn!("Track not found: {}", track);
            None
        }
    }
}

/// Files still available for matching during one edit pass.
///
/// Claiming a file removes it, so a file can never be matched to two
/// tracks, whatever its name becomes after renaming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    remaining: BTreeSet<PathBuf>,
}

impl CandidateSet {
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            remaining: paths.into_iter().collect(),
        }
    }

    /// Best remaining match for `track`, without claiming it.
    pub fn find(&self, track: &Track) -> Option<PathBuf> {
        find_track(track, self.remaining.iter().map(PathBuf::as_path))
    }

    /// Remove `path` from the set. Returns false if it was not a candidate.
    pub fn claim(&mut self, path: &Path) -> bool {
        self.remaining.remove(path)
    }

    /// Find and claim the best match for `track` in one step.
    pub fn take(&mut self, track: &Track) -> Option<PathBuf> {
        let found = self.find(track)?;
        self.claim(&found);
        Some(found)
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}
