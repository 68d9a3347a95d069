//! Extract output operations.
//!
//! Provides consistent serialization for run summaries with all fields.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::extractor::ExtractResult;
use crate::models::SectionKind;

/// Serializable summary of an extraction run.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractOutput {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub written: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub unchanged: bool,
    pub fingerprint: String,
    pub education: usize,
    pub experience: usize,
    pub projects: usize,
    pub skill_categories: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections_missing: Vec<SectionKind>,
    #[serde(skip_serializing_if = "is_zero")]
    pub dropped_records: usize,
    /// Dropped record counts per section, only sections with drops.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub dropped_by_section: BTreeMap<&'static str, usize>,
    #[serde(skip_serializing_if = "is_zero")]
    pub filtered_details: usize,
    #[serde(skip_serializing_if = "is_zero")]
    pub unresolved_markup: usize,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // Required by serde's skip_serializing_if
fn is_zero(v: &usize) -> bool {
    *v == 0
}

impl From<&ExtractResult> for ExtractOutput {
    fn from(result: &ExtractResult) -> Self {
        let report = &result.report;
        let dropped_by_section = SectionKind::ALL
            .iter()
            .map(|s| (s.as_str(), report.stats(*s).dropped))
            .filter(|(_, n)| *n > 0)
            .collect();

        Self {
            input: result.input.to_string_lossy().into_owned(),
            output: result
                .output
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            written: result.written,
            unchanged: result.unchanged,
            fingerprint: result.fingerprint.clone(),
            education: result.document.education.len(),
            experience: result.document.experience.len(),
            projects: result.document.projects.len(),
            skill_categories: result.document.skills.len(),
            sections_missing: report.sections_missing.clone(),
            dropped_records: report.dropped_records(),
            dropped_by_section,
            filtered_details: report.filtered_items(),
            unresolved_markup: report.unresolved_markup(),
        }
    }
}
