use crate::ingest::args::{find_command, next_argument, BracedArg};
use crate::ingest::markup::split_list;
use crate::ingest::scanner::{extract_items, RecordScanner};
use crate::ingest::{SectionParser, SectionStats};
use crate::models::{ProjectEntry, SectionKind};

/// Commands that carry the stack inside a project heading, by priority.
const STACK_COMMANDS: &[&str] = &["emph", "textit"];

/// `\resumeProjectHeading{\textbf{name} $|$ \emph{stack}}{date}` records.
pub struct ProjectParser<'a> {
    record_marker: &'a str,
    item_marker: &'a str,
}

impl<'a> ProjectParser<'a> {
    #[must_use]
    pub fn new(record_marker: &'a str, item_marker: &'a str) -> Self {
        Self {
            record_marker,
            item_marker,
        }
    }
}

impl SectionParser for ProjectParser<'_> {
    type Output = Vec<ProjectEntry>;

    fn kind(&self) -> SectionKind {
        SectionKind::Projects
    }

    fn parse(&self, section: &str, stats: &mut SectionStats) -> Vec<ProjectEntry> {
        let outcome = RecordScanner::new(self.record_marker, 2).scan(section);
        stats.record_drops(self.kind(), &outcome.dropped);

        let entries: Vec<ProjectEntry> = outcome
            .records
            .iter()
            .map(|record| {
                let (name, stack) = split_heading(record.args[0], stats);
                ProjectEntry {
                    name,
                    date: stats.clean(record.args[1]),
                    stack,
                    description: stats.clean_items(&extract_items(record.body, self.item_marker)),
                }
            })
            .collect();

        stats.records += entries.len();
        entries
    }
}

/// Split a composite heading into its name and comma-separated stack.
///
/// The name is the first `\textbf` group, falling back to the text before the
/// first `|`. The stack is the first `\emph`/`\textit` group after the name,
/// or empty.
pub fn split_heading(heading: &str, stats: &mut SectionStats) -> (String, Vec<String>) {
    let bold = command_argument(heading, "textbf", 0);

    let (name, stack_from) = match bold {
        Some(arg) => (stats.clean(arg.content), arg.end + 1),
        None => {
            let bar = heading.find('|').unwrap_or(heading.len());
            let name = stats
                .clean(&heading[..bar])
                .trim_matches(|c: char| c == '$' || c.is_whitespace())
                .to_string();
            (name, if bar < heading.len() { bar } else { 0 })
        }
    };

    let stack: Vec<String> = STACK_COMMANDS
        .iter()
        .find_map(|cmd| command_argument(heading, cmd, stack_from))
        .map(|raw| {
            split_list(raw.content)
                .into_iter()
                .map(|item| stats.clean(item))
                .filter(|item| !item.is_empty())
                .collect()
        })
        .unwrap_or_default();

    (name, stack)
}

fn command_argument<'a>(text: &'a str, command: &str, from: usize) -> Option<BracedArg<'a>> {
    let m = find_command(text, command, from)?;
    next_argument(text, m.end)
}
