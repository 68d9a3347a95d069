use crate::ingest::args::{find_command, next_argument};
use crate::ingest::markup::{clean_inline, collapse_whitespace, split_list, strip_backslashes, strip_math};
use crate::ingest::{SectionParser, SectionStats};
use crate::models::{SectionKind, SkillSchema, SkillSet};

/// A `\textbf{label}` followed by its value text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledValue<'a> {
    /// Cleaned label text.
    pub label: String,
    /// Raw value text.
    pub value: &'a str,
}

/// Extracts skill lists introduced by bold labels, per a fixed schema.
pub struct SkillsParser<'a> {
    schema: &'a SkillSchema,
}

impl<'a> SkillsParser<'a> {
    #[must_use]
    pub fn new(schema: &'a SkillSchema) -> Self {
        Self { schema }
    }
}

impl SectionParser for SkillsParser<'_> {
    type Output = SkillSet;

    fn kind(&self) -> SectionKind {
        SectionKind::Skills
    }

    fn parse(&self, section: &str, stats: &mut SectionStats) -> SkillSet {
        let labeled = labeled_values(section);
        let mut skills = SkillSet::new();

        // Every schema key is emitted once the section exists; absent ones stay empty.
        for category in self.schema.categories() {
            let values = match labeled.iter().find(|l| category.matches(&l.label)) {
                Some(found) => {
                    stats.records += 1;
                    parse_skill_list(found.value)
                }
                None => {
                    tracing::debug!(category = %category.label, "skill category not present");
                    Vec::new()
                }
            };
            skills.insert(category.key.clone(), values);
        }

        skills
    }
}

/// Every `\textbf{label}` with the text it introduces.
///
/// The value is the group directly following the label when there is one,
/// otherwise the text up to the next `\textbf`, `\\` or newline.
#[must_use]
pub fn labeled_values(section: &str) -> Vec<LabeledValue<'_>> {
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some(m) = find_command(section, "textbf", pos) {
        let Some(label) = next_argument(section, m.end) else {
            pos = m.end;
            continue;
        };
        let after = label.end + 1;

        let (value, resume) = match next_argument(section, after) {
            Some(group) => (group.content, group.end + 1),
            None => {
                let end = value_end(section, after);
                (&section[after..end], end)
            }
        };

        found.push(LabeledValue {
            label: clean_inline(label.content),
            value,
        });
        pos = resume;
    }

    found
}

fn value_end(section: &str, from: usize) -> usize {
    let rest = &section[from..];
    [
        find_command(section, "textbf", from).map(|m| m.start - from),
        rest.find("\\\\"),
        rest.find('\n'),
    ]
    .into_iter()
    .flatten()
    .min()
    .map_or(section.len(), |rel| from + rel)
}

/// Split a skill value on commas and clean each entry to plain text.
#[must_use]
pub fn parse_skill_list(value: &str) -> Vec<String> {
    let value = value.trim_start().trim_start_matches(':');
    let without_math = strip_math(value);
    split_list(&without_math)
        .into_iter()
        .map(|item| collapse_whitespace(&strip_backslashes(&clean_inline(item))))
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const JAKE_SKILLS: &str = r"
 \begin{itemize}[leftmargin=0.15in, label={}]
    \small{\item{
     \textbf{Languages}{: Java, Python, C/C++, SQL (Postgres), JavaScript, HTML/CSS, R} \\
     \textbf{Frameworks}{: React, Node.js, Flask, JUnit} \\
     \textbf{Developer Tools}{: Git, Docker, Google Cloud Platform, VS Code} \\
     \textbf{Libraries}{: pandas, NumPy, Matplotlib}
    }}
 \end{itemize}
";

    #[test]
    fn languages_from_braced_value() {
        let schema = SkillSchema::technical();
        let mut stats = SectionStats::default();
        let skills =
            SkillsParser::new(&schema).parse("\\textbf{Languages}{: Java, Python, C/C++}", &mut stats);
        assert_eq!(
            skills.get("languages"),
            Some(&["Java".to_string(), "Python".to_string(), "C/C++".to_string()][..])
        );
        assert_eq!(stats.records, 1);
    }

    #[test]
    fn technical_schema_extracts_all_four() {
        let schema = SkillSchema::technical();
        let mut stats = SectionStats::default();
        let skills = SkillsParser::new(&schema).parse(JAKE_SKILLS, &mut stats);

        let keys: Vec<&str> = skills.keys().collect();
        assert_eq!(keys, ["languages", "frameworks", "developerTools", "libraries"]);
        assert_eq!(skills.get("languages").unwrap()[3], "SQL (Postgres)");
        assert_eq!(skills.get("languages").unwrap().len(), 7);
        assert_eq!(
            skills.get("developerTools").unwrap(),
            ["Git", "Docker", "Google Cloud Platform", "VS Code"]
        );
        assert_eq!(stats.records, 4);
    }

    #[test]
    fn grouped_schema_with_unbraced_values() {
        let section = "\\textbf{Languages}: Rust, Go \\\\\n\
            \\textbf{Frameworks \\& Libraries}: Axum, Tokio\n\
            \\textbf{Tools \\& Platforms}: Docker, \\LaTeX, $\\rightarrow$AWS\n";
        let schema = SkillSchema::grouped();
        let mut stats = SectionStats::default();
        let skills = SkillsParser::new(&schema).parse(section, &mut stats);

        assert_eq!(skills.get("languages").unwrap(), ["Rust", "Go"]);
        assert_eq!(skills.get("frameworksAndLibraries").unwrap(), ["Axum", "Tokio"]);
        assert_eq!(
            skills.get("toolsAndPlatforms").unwrap(),
            ["Docker", "LaTeX", "AWS"]
        );
    }

    #[test]
    fn missing_categories_are_empty() {
        let schema = SkillSchema::grouped();
        let mut stats = SectionStats::default();
        let skills = SkillsParser::new(&schema).parse("\\textbf{Languages}{: Rust}", &mut stats);

        assert_eq!(
            serde_json::to_string(&skills).unwrap(),
            r#"{"languages":["Rust"],"frameworksAndLibraries":[],"toolsAndPlatforms":[]}"#
        );
        assert_eq!(stats.records, 1);
    }

    #[test]
    fn unknown_labels_are_ignored() {
        let schema = SkillSchema::technical();
        let mut stats = SectionStats::default();
        let skills = SkillsParser::new(&schema).parse("\\textbf{Hobbies}{: chess}", &mut stats);
        assert_eq!(skills.len(), 4);
        assert!(skills.get("frameworks").unwrap().is_empty());
        assert_eq!(stats.records, 0);
    }

    #[test]
    fn empty_entries_are_filtered() {
        assert_eq!(parse_skill_list(": Java, , Python,  "), ["Java", "Python"]);
    }

    #[test]
    fn labeled_values_reads_both_forms() {
        let found = labeled_values("\\textbf{A}{: x} \\textbf{B}: y \\textbf{C}");
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].label, "A");
        assert_eq!(found[0].value, ": x");
        assert_eq!(found[1].value, ": y ");
        assert_eq!(found[2].value, "");
    }
}
