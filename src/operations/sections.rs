//! Section listing: which delimiter comments exist in the source and how the
//! configured section names map onto them.

use serde::Serialize;

use crate::config::SectionSettings;
use crate::ingest::section::scan_delimiters;
use crate::models::SectionKind;

/// One delimiter found in the source.
#[derive(Debug, Clone, Serialize)]
pub struct SectionInfo {
    pub name: String,
    pub line: usize,
    /// Byte offset of the delimiter line.
    pub offset: usize,
    /// Length in bytes of the text up to the next delimiter.
    pub bytes: usize,
    /// Configured section this delimiter opens, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionKind>,
}

/// Result of listing sections.
#[derive(Debug, Clone, Serialize)]
pub struct SectionsResult {
    pub sections: Vec<SectionInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<SectionKind>,
}

/// List delimiter sections in `source`.
#[must_use]
pub fn list_sections(source: &str, names: &SectionSettings) -> SectionsResult {
    let delimiters = scan_delimiters(source);
    let mut claimed: Vec<SectionKind> = Vec::new();

    let sections = delimiters
        .iter()
        .enumerate()
        .map(|(idx, d)| {
            let body_end = delimiters.get(idx + 1).map_or(source.len(), |n| n.start);
            let section = SectionKind::ALL
                .into_iter()
                .find(|k| !claimed.contains(k) && configured_name(names, *k).eq_ignore_ascii_case(&d.name));
            if let Some(kind) = section {
                claimed.push(kind);
            }
            SectionInfo {
                name: d.name.clone(),
                line: d.line,
                offset: d.start,
                bytes: body_end.saturating_sub(d.end),
                section,
            }
        })
        .collect();

    let missing = SectionKind::ALL
        .into_iter()
        .filter(|k| !claimed.contains(k))
        .collect();

    SectionsResult { sections, missing }
}

fn configured_name(names: &SectionSettings, kind: SectionKind) -> &str {
    match kind {
        SectionKind::Education => names.education.trim(),
        SectionKind::Experience => names.experience.trim(),
        SectionKind::Projects => names.projects.trim(),
        SectionKind::Skills => names.skills.trim(),
    }
}
