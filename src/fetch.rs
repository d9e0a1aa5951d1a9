use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{extract, files};

const REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_RETRIES: u32 = 3;
const BASE_BACKOFF_MS: u64 = 2000;
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Outcome of fetching one URL, as written to the manifest.
#[derive(Debug, Clone, Serialize)]
pub struct FetchRecord {
    pub url: String,
    pub file: Option<String>,
    pub status: Option<u16>,
    pub error: Option<String>,
    pub latency_ms: Option<u64>,
    pub fetched_at: DateTime<Utc>,
}

pub struct FetchStats {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
}

/// Download every URL one at a time, keep the main content text of each
/// page in `dir`, then write the manifest. A failed URL is recorded and the
/// loop moves on.
pub async fn fetch_all(urls: &[String], dir: &Path) -> Result<FetchStats> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .context("Failed to build HTTP client")?;

    let pb = ProgressBar::new(urls.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let mut records = Vec::with_capacity(urls.len());
    for url in urls {
        let (mut record, body) = fetch_with_retry(&client, url).await;
        if let Some(html) = body {
            let text = extract::main_text(&html);
            if text.is_empty() {
                warn!("No main content found on {}", url);
            }
            let path = files::dump_path(dir, url);
            match files::write_text(&path, &text) {
                Ok(()) => {
                    debug!("Saved {} to {}", url, path.display());
                    record.file = Some(files::dump_file_name(url));
                }
                Err(e) => record.error = Some(format!("{:#}", e)),
            }
        }
        if let Some(e) = &record.error {
            warn!("Failed {}: {}", url, e);
        }
        records.push(record);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let manifest = serde_json::to_string_pretty(&records)?;
    files::write_text(dir.join(files::MANIFEST_NAME), &manifest)?;

    let stats = tally(&records);
    info!("Fetched {} pages ({} ok, {} errors)", stats.total, stats.ok, stats.errors);
    Ok(stats)
}

fn tally(records: &[FetchRecord]) -> FetchStats {
    let errors = records.iter().filter(|r| r.error.is_some()).count();
    FetchStats {
        total: records.len(),
        ok: records.len() - errors,
        errors,
    }
}

async fn fetch_with_retry(client: &reqwest::Client, url: &str) -> (FetchRecord, Option<String>) {
    for attempt in 0..MAX_RETRIES {
        let (record, body) = fetch_one(client, url).await;

        if !should_retry(record.status) {
            return (record, body);
        }

        let backoff = Duration::from_millis(BASE_BACKOFF_MS * 2u64.pow(attempt));
        warn!(
            "Got {:?} from {} (attempt {}/{}), backing off {:.1}s",
            record.status,
            url,
            attempt + 1,
            MAX_RETRIES,
            backoff.as_secs_f64()
        );
        tokio::time::sleep(backoff).await;
    }

    fetch_one(client, url).await
}

fn should_retry(status: Option<u16>) -> bool {
    matches!(status, Some(429 | 500 | 502 | 503))
}

async fn fetch_one(client: &reqwest::Client, url: &str) -> (FetchRecord, Option<String>) {
    let start = Instant::now();
    let result = get_text(client, url).await;
    let latency_ms = Some(start.elapsed().as_millis() as u64);

    let mut record = FetchRecord {
        url: url.to_string(),
        file: None,
        status: None,
        error: None,
        latency_ms,
        fetched_at: Utc::now(),
    };

    match result {
        Ok((status, body)) if (200..300).contains(&status) => {
            record.status = Some(status);
            (record, Some(body))
        }
        Ok((status, _)) => {
            record.status = Some(status);
            record.error = Some(format!("HTTP {}", status));
            (record, None)
        }
        Err(e) => {
            record.status = e.status().map(|s| s.as_u16());
            record.error = Some(e.to_string());
            (record, None)
        }
    }
}

async fn get_text(client: &reqwest::Client, url: &str) -> reqwest::Result<(u16, String)> {
    let response = client.get(url).send().await?;
    let status = response.status().as_u16();
    let body = response.text().await?;
    Ok((status, body))
}
