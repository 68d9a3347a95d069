use std::sync::LazyLock;

use regex::Regex;

use crate::ingest::scanner::{extract_items, RecordScanner};
use crate::ingest::{SectionParser, SectionStats};
use crate::models::{EducationEntry, SectionKind};

/// "Year 1: 2:1", "year 2 : First".
static YEAR_GRADE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^year\s*\d+\s*:").expect("year pattern is valid"));

/// "89%", "72.5 %".
static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)?\s*%$").expect("percent pattern is valid"));

/// Whether a cleaned detail line only reports a grade.
#[must_use]
pub fn is_grade_line(detail: &str) -> bool {
    YEAR_GRADE_RE.is_match(detail) || PERCENT_RE.is_match(detail)
}

/// `\resumeSubheading{institution}{location}{qualification}{duration}` records.
pub struct EducationParser<'a> {
    record_marker: &'a str,
    item_marker: &'a str,
    filter_grades: bool,
}

impl<'a> EducationParser<'a> {
    #[must_use]
    pub fn new(record_marker: &'a str, item_marker: &'a str) -> Self {
        Self {
            record_marker,
            item_marker,
            filter_grades: false,
        }
    }

    /// Drop grade-only detail lines.
    #[must_use]
    pub fn with_grade_filter(mut self, enabled: bool) -> Self {
        self.filter_grades = enabled;
        self
    }
}

impl SectionParser for EducationParser<'_> {
    type Output = Vec<EducationEntry>;

    fn kind(&self) -> SectionKind {
        SectionKind::Education
    }

    fn parse(&self, section: &str, stats: &mut SectionStats) -> Vec<EducationEntry> {
        let outcome = RecordScanner::new(self.record_marker, 4).scan(section);
        stats.record_drops(self.kind(), &outcome.dropped);

        let entries: Vec<EducationEntry> = outcome
            .records
            .iter()
            .map(|record| {
                let mut details = stats.clean_items(&extract_items(record.body, self.item_marker));
                if self.filter_grades {
                    let before = details.len();
                    details.retain(|d| !is_grade_line(d));
                    stats.filtered += before - details.len();
                }
                EducationEntry {
                    institution: stats.clean(record.args[0]),
                    location: stats.clean(record.args[1]),
                    qualification: stats.clean(record.args[2]),
                    duration: stats.clean(record.args[3]),
                    details,
                }
            })
            .collect();

        stats.records += entries.len();
        entries
    }
}
