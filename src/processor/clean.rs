use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&\w+;").unwrap());
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\x1C-\x1F]+").unwrap());
static DOCTYPE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<!DOCTYPE[^>]*>").unwrap());

/// Strip markup and normalize whitespace.
///
/// Passes run in a fixed order: tags, entities (replaced by a space),
/// backslashes, whitespace runs, DOCTYPE declarations, then a final trim.
pub fn clean_text(text: &str) -> String {
    let text = TAG_RE.replace_all(text, "");
    let text = ENTITY_RE.replace_all(&text, " ");
    let text = text.replace('\\', "");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    // Already covered by TAG_RE for well-formed input.
    let text = DOCTYPE_RE.replace_all(&text, "");
    trim_space(&text).to_string()
}

/// Unicode whitespace plus the ASCII separators U+001C..=U+001F.
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\x1C'..='\x1F').contains(&c)
}

pub fn trim_space(s: &str) -> &str {
    s.trim_matches(is_space)
}
