//! Tag inspection command.

use std::path::Path;

use crate::metadata::{self, FileTags};

/// Print the tags of one audio file
pub fn cmd_tags(path: &Path) -> anyhow::Result<()> {
    let tags = metadata::read_tags(path)?;
    println!("{}", path.display());
    print!("{}", format_tags(&tags));
    Ok(())
}

fn format_tags(tags: &FileTags) -> String {
    let mut out = String::new();
    let mut line = |label: &str, value: Option<String>| {
        if let Some(value) = value {
            out.push_str(&format!("  {:<13}{}\n", label, value));
        }
    };

    line("Track:", tags.track_number.map(|n| n.to_string()));
    line("Title:", tags.title.clone());
    line("Artist:", tags.artist.clone());
    line("Album artist:", tags.album_artist.clone());
    line("Album:", tags.album.clone());
    line("Genre:", tags.genre.clone());
    line("Year:", tags.year.map(|y| y.to_string()));
    line("Comment:", tags.comment.clone());
    line(
        "Lyrics:",
        tags.lyrics
            .as_ref()
            .map(|l| format!("{} lines", l.lines().count())),
    );
    line(
        "Pictures:",
        (tags.picture_count > 0).then(|| tags.picture_count.to_string()),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tags_skips_missing() {
        let tags = FileTags {
            track_number: Some(4),
            title: Some("Yellow".to_string()),
            lyrics: Some("Look at the stars\nLook how they shine".to_string()),
            ..FileTags::default()
        };

        let text = format_tags(&tags);

        assert!(text.contains("Track:       4"));
        assert!(text.contains("Title:       Yellow"));
        assert!(text.contains("Lyrics:      2 lines"));
        assert!(!text.contains("Artist:"));
        assert!(!text.contains("Pictures:"));
    }

    #[test]
    fn test_tags_of_missing_file_fail() {
        assert!(cmd_tags(Path::new("/nonexistent/song.mp3")).is_err());
    }
}
