//! Helpers for pulling lyrics out of scraped HTML pages.
//!
//! Lyrics sites wrap the text in a known marker followed by nested `<div>`
//! blocks. [`extract_text`] walks the div nesting to find where the block
//! ends; [`strip_lyrics`] turns the remaining markup into plain text.

use once_cell::sync::Lazy;
use regex::Regex;

static DIV_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(/?)div>?").unwrap());
static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static ENTITY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"&(#\d+|[a-z]+);").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static SPACE_BEFORE_NEWLINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" *\n *").unwrap());
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Text between `start_marker` and the `</div>` closing the block the
/// marker sits in.
///
/// Nested div blocks inside the lyrics are skipped entirely (sites put ads
/// there). Returns `None` when the marker is missing or the block never
/// closes.
pub fn extract_text(html: &str, start_marker: &str) -> Option<String> {
    let (_, rest) = html.split_once(start_marker)?;

    let mut parts = Vec::new();
    let mut level: i32 = 0;
    let mut pos = 0;

    for caps in DIV_RE.captures_iter(rest) {
        let whole = caps.get(0)?;
        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());

        if closing {
            level -= 1;
            if level == -1 {
                parts.push(&rest[pos..whole.start()]);
                return Some(parts.concat());
            }
            if level == 0 {
                pos = whole.end();
            }
        } else {
            if level == 0 {
                parts.push(&rest[pos..whole.start()]);
            }
            level += 1;
        }
    }

    None
}

fn unescape(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &regex::Captures| {
            let entity = &caps[1];
            if let Some(code) = entity.strip_prefix('#') {
                return code
                    .parse::<u32>()
                    .ok()
                    .and_then(char::from_u32)
                    .map(String::from)
                    .unwrap_or_default();
            }
            match entity {
                "nbsp" => " ".to_string(),
                "amp" => "&".to_string(),
                "quot" => "\"".to_string(),
                "apos" => "'".to_string(),
                "lt" => "<".to_string(),
                "gt" => ">".to_string(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Turn a block of lyrics markup into plain text.
///
/// Comments are dropped, whitespace collapses, `<br>` becomes a newline,
/// every other tag disappears and entities are decoded.
pub fn strip_lyrics(markup: &str) -> String {
    let text = COMMENT_RE.replace_all(markup, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    let text = BREAK_RE.replace_all(&text, "\n");
    let text = TAG_RE.replace_all(&text, "");
    let text = unescape(&text).replace('\r', "\n");
    let text = SPACE_BEFORE_NEWLINE_RE.replace_all(&text, "\n");
    text.trim().to_string()
}

/// Characters sites expect in ASCII form in their URLs
const URL_REPLACEMENTS: [(char, &str); 6] = [
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{2013}', "-"),
    ('\u{2014}', "-"),
];

/// Replace typographic quotes and dashes with their ASCII forms.
pub fn plain_ascii_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match URL_REPLACEMENTS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => out.push_str(to),
            None => out.push(c),
        }
    }
    out
}
