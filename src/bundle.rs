use std::path::Path;

use anyhow::Result;
use tracing::{debug, warn};

use crate::files;
use crate::processor::sections::MARKER;

pub struct BundleStats {
    pub included: usize,
    pub missing: usize,
}

/// Concatenate per-URL dumps from `dir` into one marker-delimited document,
/// in URL list order. URLs without a dump are skipped.
pub fn bundle_dumps(urls: &[String], dir: &Path) -> Result<(String, BundleStats)> {
    let mut out = String::new();
    let mut stats = BundleStats {
        included: 0,
        missing: 0,
    };

    for url in urls {
        let path = files::dump_path(dir, url);
        if !path.is_file() {
            warn!("No dump for {} (expected {})", url, path.display());
            stats.missing += 1;
            continue;
        }
        let body = files::read_text(&path)?;
        debug!("Bundling {} ({} bytes)", url, body.len());
        push_section(&mut out, url, &body);
        stats.included += 1;
    }

    Ok((out, stats))
}

fn push_section(out: &mut String, url: &str, body: &str) {
    out.push_str(MARKER);
    out.push(' ');
    out.push_str(url);
    out.push_str("\n\n");
    out.push_str(body.trim_end());
    out.push_str("\n\n");
}
