use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// `%-----------NAME-----------` on a line of its own. Dash-only rule lines
/// never match because the name must start with a non-dash character.
static DELIMITER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*%-{3,}[ \t]*([^-\r\n][^\r\n]*?)[ \t]*-{3,}[ \t]*\r?$")
        .expect("delimiter pattern is valid")
});

/// Where a section stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionEnd<'a> {
    /// At the first occurrence of this marker after the start marker.
    Marker(&'a str),
    /// At the end of the document.
    EndOfDocument,
}

/// Text strictly between the first `start_marker` and the following end marker.
///
/// `None` means the start marker is absent. A missing end marker is not an
/// error: the section then runs to the end of the document.
#[must_use]
pub fn slice_between<'a>(
    document: &'a str,
    start_marker: &str,
    end: SectionEnd<'_>,
) -> Option<&'a str> {
    if start_marker.is_empty() {
        return None;
    }
    let start = document.find(start_marker)? + start_marker.len();
    let rest = &document[start..];
    match end {
        SectionEnd::Marker(marker) if !marker.is_empty() => {
            Some(rest.find(marker).map_or(rest, |i| &rest[..i]))
        }
        _ => Some(rest),
    }
}

/// A delimiter comment line found in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delimiter {
    /// Section name between the dash runs.
    pub name: String,
    /// 1-based line number.
    pub line: usize,
    /// Byte offset where the delimiter text starts.
    pub start: usize,
    /// Byte offset just past the delimiter text (excluding the newline).
    pub end: usize,
}

/// All delimiter lines, in source order.
#[must_use]
pub fn scan_delimiters(document: &str) -> Vec<Delimiter> {
    let mut line = 1;
    let mut counted_to = 0;
    DELIMITER_RE
        .captures_iter(document)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?.as_str().trim();
            line += document[counted_to..whole.start()].matches('\n').count();
            counted_to = whole.start();
            Some(Delimiter {
                name: name.to_string(),
                line,
                start: whole.start(),
                end: whole.start() + whole.as_str().trim_end().len(),
            })
        })
        .collect()
}

/// Splits a document into named sections by delimiter lines.
///
/// A section ends at the next delimiter line of any name, so sections may
/// appear in any order and unrelated delimiters (e.g. `HEADING`) bound them
/// correctly.
pub struct Segmenter<'a> {
    document: &'a str,
    delimiters: Vec<Delimiter>,
}

impl<'a> Segmenter<'a> {
    #[must_use]
    pub fn new(document: &'a str) -> Self {
        Self {
            document,
            delimiters: scan_delimiters(document),
        }
    }

    #[must_use]
    pub fn delimiters(&self) -> &[Delimiter] {
        &self.delimiters
    }

    /// Body of the first section called `name` (ASCII case-insensitive).
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&'a str> {
        let name = name.trim();
        let idx = self
            .delimiters
            .iter()
            .position(|d| d.name.eq_ignore_ascii_case(name))?;
        let start = &self.delimiters[idx];
        let from = &self.document[start.start..];
        let marker = &self.document[start.start..start.end];
        let end = self
            .delimiters
            .get(idx + 1)
            .map_or(SectionEnd::EndOfDocument, |next| {
                SectionEnd::Marker(&self.document[next.start..next.end])
            });
        slice_between(from, marker, end)
    }
}
