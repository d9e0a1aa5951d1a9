mod bundle;
mod extract;
mod fetch;
mod files;
mod processor;

use std::path::Path;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::info;

use processor::{ContentReport, SectionStatus};

#[derive(Parser)]
#[command(
    name = "make_training",
    about = "Clean scraped multi-source dumps into annotated training text"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean raw_content.txt into "Make Training.txt" (default)
    Process,
    /// Download every URL in urls.txt into make_docs/
    Fetch,
    /// Concatenate make_docs/ dumps into raw_content.txt
    Bundle,
    /// Per-section report for raw_content.txt (writes nothing)
    Stats {
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Process) {
        Commands::Process => {
            let raw = files::read_text(files::RAW_CONTENT_PATH)?;
            info!("Read {} ({} bytes)", files::RAW_CONTENT_PATH, raw.len());
            let cleaned = processor::process_content(&raw);
            files::write_text(files::OUTPUT_PATH, &cleaned)?;

            let report = processor::summarize(&raw);
            println!(
                "Wrote {:?}: {} sections ({} skipped, {} with source), {} -> {} chars.",
                files::OUTPUT_PATH,
                report.sections.len(),
                report.count(SectionStatus::Skipped),
                report.annotated(),
                report.input_chars,
                report.output_chars,
            );
            Ok(())
        }
        Commands::Fetch => {
            let urls = files::read_url_list(files::URL_LIST_PATH)?;
            if urls.is_empty() {
                println!("No URLs in {}.", files::URL_LIST_PATH);
                return Ok(());
            }
            println!("Fetching {} URLs into {}/...", urls.len(), files::DUMP_DIR);
            let stats = fetch::fetch_all(&urls, Path::new(files::DUMP_DIR)).await?;
            println!(
                "Done: {} fetched ({} ok, {} errors).",
                stats.total, stats.ok, stats.errors
            );
            Ok(())
        }
        Commands::Bundle => {
            let urls = files::read_url_list(files::URL_LIST_PATH)?;
            let (raw, stats) = bundle::bundle_dumps(&urls, Path::new(files::DUMP_DIR))?;
            if stats.included == 0 {
                println!("No dumps found in {}/. Run 'fetch' first.", files::DUMP_DIR);
                return Ok(());
            }
            files::write_text(files::RAW_CONTENT_PATH, &raw)?;
            println!(
                "Bundled {} dumps into {} ({} missing).",
                stats.included,
                files::RAW_CONTENT_PATH,
                stats.missing
            );
            Ok(())
        }
        Commands::Stats { limit } => {
            let raw = files::read_text(files::RAW_CONTENT_PATH)?;
            let report = processor::summarize(&raw);
            print_report(&report, limit);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn print_report(report: &ContentReport, limit: usize) {
    println!(
        "{:>3} | {:<48} | {:>8} | {:>8} | {:<11}",
        "#", "Source", "Raw", "Cleaned", "Status"
    );
    println!("{}", "-".repeat(90));

    for s in report.sections.iter().take(limit) {
        let source = s.source.as_deref().map(|u| truncate(u, 48)).unwrap_or_else(|| "-".into());
        println!(
            "{:>3} | {:<48} | {:>8} | {:>8} | {:<11}",
            s.index,
            source,
            s.raw_chars,
            s.cleaned_chars,
            s.status.label()
        );
    }
    if report.sections.len() > limit {
        println!("... {} more", report.sections.len() - limit);
    }

    println!(
        "\n{} sections | {} emitted | {} empty | {} skipped",
        report.sections.len(),
        report.count(SectionStatus::Emitted),
        report.count(SectionStatus::Empty),
        report.count(SectionStatus::Skipped),
    );
    println!("{} -> {} chars", report.input_chars, report.output_chars);
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
