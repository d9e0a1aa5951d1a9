use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const RAW_CONTENT_PATH: &str = "raw_content.txt";
pub const OUTPUT_PATH: &str = "Make Training.txt";
pub const URL_LIST_PATH: &str = "urls.txt";
pub const DUMP_DIR: &str = "make_docs";
pub const MANIFEST_NAME: &str = "manifest.json";

const DUMP_NAME_MAX: usize = 100;

/// Read a whole UTF-8 file. Missing files and invalid UTF-8 are errors.
pub fn read_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Overwrite `path` with `contents`.
pub fn write_text(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

/// Non-blank, trimmed lines of the URL list, in file order.
pub fn read_url_list(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let text = read_text(path)?;
    Ok(parse_url_list(&text))
}

pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Dump filename for a URL: non-alphanumerics become `_`, lowercased,
/// cut to 100 chars, `.txt` appended.
pub fn dump_file_name(url: &str) -> String {
    let stem: String = url
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .take(DUMP_NAME_MAX)
        .collect();
    format!("{}.txt", stem)
}

pub fn dump_path(dir: impl AsRef<Path>, url: &str) -> PathBuf {
    dir.as_ref().join(dump_file_name(url))
}
