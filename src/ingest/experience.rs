use crate::ingest::scanner::{extract_items, RecordScanner};
use crate::ingest::{SectionParser, SectionStats};
use crate::models::{ExperienceEntry, SectionKind};

/// `\resumeSubheading{role}{company}{subtitle}{duration}` records.
///
/// The subtitle (usually a location) must be present for the record to be
/// well formed but is not part of the output.
pub struct ExperienceParser<'a> {
    record_marker: &'a str,
    item_marker: &'a str,
}

impl<'a> ExperienceParser<'a> {
    #[must_use]
    pub fn new(record_marker: &'a str, item_marker: &'a str) -> Self {
        Self {
            record_marker,
            item_marker,
        }
    }
}

impl SectionParser for ExperienceParser<'_> {
    type Output = Vec<ExperienceEntry>;

    fn kind(&self) -> SectionKind {
        SectionKind::Experience
    }

    fn parse(&self, section: &str, stats: &mut SectionStats) -> Vec<ExperienceEntry> {
        let outcome = RecordScanner::new(self.record_marker, 4).scan(section);
        stats.record_drops(self.kind(), &outcome.dropped);

        let entries: Vec<ExperienceEntry> = outcome
            .records
            .iter()
            .map(|record| ExperienceEntry {
                role: stats.clean(record.args[0]),
                company: stats.clean(record.args[1]),
                duration: stats.clean(record.args[3]),
                description: stats.clean_items(&extract_items(record.body, self.item_marker)),
            })
            .collect();

        stats.records += entries.len();
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> ExperienceParser<'static> {
        ExperienceParser::new("resumeSubheading", "resumeItem")
    }

    #[test]
    fn parses_roles_in_order() {
        let section = r"
    \resumeSubHeadingListStart
      \resumeSubheading
        {Software Engineer Intern}{Acme Ltd}{London, UK}{June 2025 -- Aug 2025}
        \resumeItemListStart
          \resumeItem{Built \textbf{real-time} systems}
          \resumeItem{Cut p99 latency by 40\%}
        \resumeItemListEnd
      \resumeSubheading
        {Teaching Assistant}{University}{Remote}{2024}
    \resumeSubHeadingListEnd
";
        let mut stats = SectionStats::default();
        let entries = parser().parse(section, &mut stats);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role, "Software Engineer Intern");
        assert_eq!(entries[0].company, "Acme Ltd");
        assert_eq!(entries[0].duration, "June 2025 \u{2013} Aug 2025");
        assert_eq!(
            entries[0].description,
            ["Built real-time systems", "Cut p99 latency by 40%"]
        );
        assert_eq!(entries[1].role, "Teaching Assistant");
        assert!(entries[1].description.is_empty());
        assert_eq!(stats.records, 2);
        assert_eq!(stats.dropped, 0);
    }

    #[test]
    fn record_missing_closing_brace_does_not_affect_next() {
        let section = r"\resumeSubheading{Dev}{Co}{City{2023}\resumeItem{lost}
\resumeSubheading{Lead}{Other Co}{Town}{2024}\resumeItem{kept}";
        let mut stats = SectionStats::default();
        let entries = parser().parse(section, &mut stats);
        assert_eq!(stats.dropped, 1);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].role, "Lead");
        assert_eq!(entries[0].description, ["kept"]);
    }

    #[test]
    fn empty_section_yields_nothing() {
        let mut stats = SectionStats::default();
        assert!(parser().parse("", &mut stats).is_empty());
        assert_eq!(stats, SectionStats::default());
    }
}
