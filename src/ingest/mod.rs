pub mod args;
pub mod education;
pub mod experience;
pub mod markup;
pub mod projects;
pub mod scanner;
pub mod section;
pub mod skills;

pub use education::EducationParser;
pub use experience::ExperienceParser;
pub use projects::ProjectParser;
pub use scanner::RecordScanner;
pub use section::Segmenter;
pub use skills::SkillsParser;

use serde::Serialize;

use crate::models::SectionKind;

/// Trait for per-section extractors.
pub trait SectionParser {
    type Output;

    /// Which section this parser reads.
    fn kind(&self) -> SectionKind;

    /// Extract records from one section's text. Never fails; problems are
    /// recorded in `stats`.
    fn parse(&self, section: &str, stats: &mut SectionStats) -> Self::Output;
}

/// Completeness counters for one section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionStats {
    /// Records (or skill categories) emitted.
    pub records: usize,
    /// Record occurrences dropped because fixed arguments were malformed.
    pub dropped: usize,
    /// Items removed by a content filter.
    pub filtered: usize,
    /// Cleaned fields that still contain a `\command`.
    pub unresolved_markup: usize,
}

impl SectionStats {
    /// Clean a raw field, counting leftover markup.
    pub fn clean(&mut self, raw: &str) -> String {
        let cleaned = markup::clean_inline(raw);
        if markup::has_unresolved_markup(&cleaned) {
            self.unresolved_markup += 1;
        }
        cleaned
    }

    /// Clean item arguments, dropping empty results.
    pub fn clean_items(&mut self, raw: &[&str]) -> Vec<String> {
        raw.iter()
            .map(|item| self.clean(item))
            .filter(|item| !item.is_empty())
            .collect()
    }

    pub(crate) fn record_drops(&mut self, kind: SectionKind, dropped: &[scanner::DroppedRecord<'_>]) {
        for record in dropped {
            tracing::warn!(
                section = kind.as_str(),
                offset = record.offset,
                near = record.snippet,
                "dropping malformed record"
            );
        }
        self.dropped += dropped.len();
    }
}
