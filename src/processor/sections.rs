use std::sync::LazyLock;

use regex::Regex;

use super::clean::trim_space;

/// Delimits concatenated sources in a raw dump.
pub const MARKER: &str = "Content from:";

static LEADING_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s\x1C-\x1F]*(https?://[^\s\x1C-\x1F]+)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub source: Option<&'a str>,
    pub raw: &'a str,
}

impl Section<'_> {
    pub fn is_blank(&self) -> bool {
        trim_space(self.raw).is_empty()
    }
}

/// Split a raw document on every marker occurrence. The marker itself is
/// dropped; blank sections are kept so callers can count them.
pub fn split_sections(raw: &str) -> Vec<Section<'_>> {
    raw.split(MARKER)
        .map(|raw| Section {
            source: leading_url(raw),
            raw,
        })
        .collect()
}

/// URL at the very start of a section, after optional whitespace.
pub fn leading_url(section: &str) -> Option<&str> {
    LEADING_URL_RE
        .captures(section)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
