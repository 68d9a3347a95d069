use std::path::PathBuf;

use serde::Serialize;

use crate::config::{Config, UserSettings};
use crate::error::{CvError, Result};
use crate::ingest::{
    EducationParser, ExperienceParser, ProjectParser, SectionParser, SectionStats, Segmenter,
    SkillsParser,
};
use crate::models::{ResumeDocument, SectionKind, SkillSchema};
use crate::writer::{hash_bytes, hash_file, write_atomic};

/// Per-run completeness report. Never part of the output document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractReport {
    pub sections_found: Vec<SectionKind>,
    pub sections_missing: Vec<SectionKind>,
    pub education: SectionStats,
    pub experience: SectionStats,
    pub projects: SectionStats,
    pub skills: SectionStats,
}

impl ExtractReport {
    #[must_use]
    pub fn stats(&self, section: SectionKind) -> &SectionStats {
        match section {
            SectionKind::Education => &self.education,
            SectionKind::Experience => &self.experience,
            SectionKind::Projects => &self.projects,
            SectionKind::Skills => &self.skills,
        }
    }

    fn stats_mut(&mut self, section: SectionKind) -> &mut SectionStats {
        match section {
            SectionKind::Education => &mut self.education,
            SectionKind::Experience => &mut self.experience,
            SectionKind::Projects => &mut self.projects,
            SectionKind::Skills => &mut self.skills,
        }
    }

    /// Record occurrences dropped across all sections.
    #[must_use]
    pub fn dropped_records(&self) -> usize {
        SectionKind::ALL.iter().map(|s| self.stats(*s).dropped).sum()
    }

    #[must_use]
    pub fn filtered_items(&self) -> usize {
        SectionKind::ALL.iter().map(|s| self.stats(*s).filtered).sum()
    }

    #[must_use]
    pub fn unresolved_markup(&self) -> usize {
        SectionKind::ALL
            .iter()
            .map(|s| self.stats(*s).unresolved_markup)
            .sum()
    }
}

/// The extracted document with its report.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub document: ResumeDocument,
    pub report: ExtractReport,
}

/// Outcome of a full run.
#[derive(Debug, Clone)]
pub struct ExtractResult {
    pub input: PathBuf,
    /// `None` for dry runs.
    pub output: Option<PathBuf>,
    /// Whether the output file was (re)written.
    pub written: bool,
    /// Output already had identical bytes; nothing was written.
    pub unchanged: bool,
    /// SHA-256 of the serialized document.
    pub fingerprint: String,
    /// Serialized output document.
    pub json: String,
    pub document: ResumeDocument,
    pub report: ExtractReport,
}

/// Extract the resume document from LaTeX source. Pure and deterministic.
#[must_use]
pub fn extract_document(source: &str, settings: &UserSettings) -> Extraction {
    let segmenter = Segmenter::new(source);
    let markers = &settings.markers;
    let names = &settings.sections;
    let schema = SkillSchema::from_kind(settings.skills.schema, &settings.skills.categories);

    let mut document = ResumeDocument::default();
    let mut report = ExtractReport::default();

    document.education = run_parser(
        &segmenter,
        &names.education,
        &EducationParser::new(&markers.education, &markers.item)
            .with_grade_filter(settings.education.filter_grades),
        &mut report,
    );
    document.experience = run_parser(
        &segmenter,
        &names.experience,
        &ExperienceParser::new(&markers.experience, &markers.item),
        &mut report,
    );
    document.projects = run_parser(
        &segmenter,
        &names.projects,
        &ProjectParser::new(&markers.project, &markers.item),
        &mut report,
    );
    document.skills = run_parser(
        &segmenter,
        &names.skills,
        &SkillsParser::new(&schema),
        &mut report,
    );

    Extraction { document, report }
}

fn run_parser<P>(
    segmenter: &Segmenter<'_>,
    name: &str,
    parser: &P,
    report: &mut ExtractReport,
) -> P::Output
where
    P: SectionParser,
    P::Output: Default,
{
    let kind = parser.kind();
    let Some(text) = segmenter.section(name) else {
        tracing::debug!(section = kind.as_str(), delimiter = name, "section not found");
        report.sections_missing.push(kind);
        return P::Output::default();
    };

    report.sections_found.push(kind);
    let stats = report.stats_mut(kind);
    let output = parser.parse(text, stats);
    tracing::debug!(
        section = kind.as_str(),
        records = stats.records,
        dropped = stats.dropped,
        "section extracted"
    );
    output
}

/// Run the extractor: read the input, extract, write the output once.
///
/// A missing input is fatal and leaves any previous output untouched.
pub fn run_extract(config: &Config, dry_run: bool) -> Result<ExtractResult> {
    let input = config.input_path();
    if !input.is_file() {
        return Err(CvError::InputNotFound {
            path: input.to_string_lossy().into_owned(),
        });
    }

    let source = std::fs::read_to_string(&input)?;
    let Extraction { document, report } = extract_document(&source, &config.settings);
    let json = document.to_json_pretty()?;
    let fingerprint = hash_bytes(json.as_bytes());

    if report.dropped_records() > 0 {
        tracing::warn!(
            dropped = report.dropped_records(),
            "some records were malformed and skipped"
        );
    }

    let mut result = ExtractResult {
        input,
        output: None,
        written: false,
        unchanged: false,
        fingerprint,
        json,
        document,
        report,
    };

    if dry_run {
        return Ok(result);
    }

    let output = config.output_path();
    let unchanged = output.is_file()
        && hash_file(&output).is_ok_and(|existing| existing == result.fingerprint);

    if unchanged {
        tracing::info!(path = %output.display(), "output unchanged");
    } else {
        write_atomic(&output, &result.json)?;
        tracing::info!(path = %output.display(), "output written");
    }

    result.written = !unchanged;
    result.unchanged = unchanged;
    result.output = Some(output);
    Ok(result)
}
