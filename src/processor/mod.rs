pub mod clean;
pub mod sections;

pub use clean::clean_text;
use sections::split_sections;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedSection {
    pub source: Option<String>,
    pub body: String,
}

impl CleanedSection {
    /// Output pieces for this section. Annotation and body are emitted
    /// independently, so a sourced section with an empty body still
    /// contributes its `Source:` line.
    fn pieces(&self) -> impl Iterator<Item = String> + '_ {
        let annotation = self.source.as_ref().map(|url| format!("\n\nSource: {}\n", url));
        let body = Some(self.body.clone()).filter(|b| !b.is_empty());
        annotation.into_iter().chain(body)
    }
}

/// Two-pass pipeline: raw document → sections → cleaned sections.
/// Blank sections are dropped.
pub fn clean_sections(raw: &str) -> Vec<CleanedSection> {
    split_sections(raw)
        .into_iter()
        .filter(|s| !s.is_blank())
        .map(|s| CleanedSection {
            source: s.source.map(str::to_string),
            body: clean_text(s.raw),
        })
        .collect()
}

pub fn render(sections: &[CleanedSection]) -> String {
    sections
        .iter()
        .flat_map(CleanedSection::pieces)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Clean a raw multi-source dump into annotated training text.
pub fn process_content(raw: &str) -> String {
    render(&clean_sections(raw))
}

// ── Reporting ──

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionStatus {
    Skipped,
    Empty,
    Emitted,
}

impl SectionStatus {
    pub fn label(self) -> &'static str {
        match self {
            SectionStatus::Skipped => "skipped",
            SectionStatus::Empty => "empty",
            SectionStatus::Emitted => "emitted",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SectionSummary {
    pub index: usize,
    pub source: Option<String>,
    pub raw_chars: usize,
    pub cleaned_chars: usize,
    pub status: SectionStatus,
}

#[derive(Debug, Clone, Default)]
pub struct ContentReport {
    pub sections: Vec<SectionSummary>,
    pub input_chars: usize,
    pub output_chars: usize,
}

impl ContentReport {
    pub fn count(&self, status: SectionStatus) -> usize {
        self.sections.iter().filter(|s| s.status == status).count()
    }

    pub fn annotated(&self) -> usize {
        self.sections.iter().filter(|s| s.source.is_some()).count()
    }
}

/// Per-section accounting for a raw document, including skipped sections.
pub fn summarize(raw: &str) -> ContentReport {
    let sections = split_sections(raw)
        .into_iter()
        .enumerate()
        .map(|(index, section)| {
            let raw_chars = section.raw.chars().count();
            if section.is_blank() {
                return SectionSummary {
                    index,
                    source: None,
                    raw_chars,
                    cleaned_chars: 0,
                    status: SectionStatus::Skipped,
                };
            }
            // A detected source survives cleaning, so sourced sections always
            // have a body.
            let cleaned_chars = clean_text(section.raw).chars().count();
            let status = if cleaned_chars > 0 {
                SectionStatus::Emitted
            } else {
                SectionStatus::Empty
            };
            SectionSummary {
                index,
                source: section.source.map(str::to_string),
                raw_chars,
                cleaned_chars,
                status,
            }
        })
        .collect();

    ContentReport {
        sections,
        input_chars: raw.chars().count(),
        output_chars: process_content(raw).chars().count(),
    }
}
