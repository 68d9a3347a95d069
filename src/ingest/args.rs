//! Brace-balanced argument extraction and command lookup.
//!
//! All scanning is byte-based: `\`, `{` and `}` are ASCII, so every index
//! returned here is a valid `str` boundary.

/// Content of one `{...}` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracedArg<'a> {
    /// Text strictly inside the outer braces.
    pub content: &'a str,
    /// Byte index of the opening `{`.
    pub start: usize,
    /// Byte index of the matching `}`.
    pub end: usize,
}

/// Extract the first balanced `{...}` group at or after `offset`.
///
/// Returns `None` when no `{` follows `offset` or the group never closes.
/// `\{` and `\}` are literal characters and do not affect nesting.
#[must_use]
pub fn extract_braced(text: &str, offset: usize) -> Option<BracedArg<'_>> {
    let bytes = text.as_bytes();
    let mut i = offset;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'{' => return braced_at(text, i),
            _ => i += 1,
        }
    }
    None
}

/// Extract a group that must start at the next non-whitespace character.
///
/// Used for fixed command arguments: a missing argument yields `None` rather
/// than borrowing a later group.
#[must_use]
pub fn next_argument(text: &str, offset: usize) -> Option<BracedArg<'_>> {
    let bytes = text.as_bytes();
    let mut i = offset;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if bytes.get(i) == Some(&b'{') {
        braced_at(text, i)
    } else {
        None
    }
}

/// Pull `count` consecutive fixed arguments. Returns the contents and the
/// index just past the last closing brace.
#[must_use]
pub fn fixed_arguments(text: &str, offset: usize, count: usize) -> Option<(Vec<&str>, usize)> {
    let mut args = Vec::with_capacity(count);
    let mut pos = offset;
    for _ in 0..count {
        let arg = next_argument(text, pos)?;
        args.push(arg.content);
        pos = arg.end + 1;
    }
    Some((args, pos))
}

fn braced_at(text: &str, open: usize) -> Option<BracedArg<'_>> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(BracedArg {
                        content: &text[open + 1..i],
                        start: open,
                        end: i,
                    });
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Location of a `\name` command in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandMatch {
    /// Byte index of the backslash.
    pub start: usize,
    /// Byte index just past the command name.
    pub end: usize,
}

/// Find the next `\name` at or after `from`.
///
/// Matches on a command-name boundary only, so `resumeItem` does not match
/// `\resumeItemListStart`, and skips escaped backslashes (`\\name`).
#[must_use]
pub fn find_command(text: &str, name: &str, from: usize) -> Option<CommandMatch> {
    if name.is_empty() {
        return None;
    }
    let bytes = text.as_bytes();
    let step = name.chars().next().map_or(1, char::len_utf8);
    let mut search = from;
    while search < text.len() {
        let rel = text[search..].find(name)?;
        let name_start = search + rel;
        let end = name_start + name.len();
        search = name_start + step;

        if name_start == 0 || bytes[name_start - 1] != b'\\' {
            continue;
        }
        let backslash = name_start - 1;
        if backslash < from || preceding_backslashes(bytes, backslash) % 2 == 1 {
            continue;
        }
        if bytes.get(end).is_some_and(u8::is_ascii_alphabetic) {
            continue;
        }
        return Some(CommandMatch {
            start: backslash,
            end,
        });
    }
    None
}

/// All occurrences of `\name`, in source order.
#[must_use]
pub fn find_all_commands(text: &str, name: &str) -> Vec<CommandMatch> {
    let mut found = Vec::new();
    let mut pos = 0;
    while let Some(m) = find_command(text, name, pos) {
        found.push(m);
        pos = m.end;
    }
    found
}

fn preceding_backslashes(bytes: &[u8], idx: usize) -> usize {
    bytes[..idx].iter().rev().take_while(|b| **b == b'\\').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_simple_group() {
        let arg = extract_braced("\\cmd{hello}", 0).unwrap();
        assert_eq!(arg.content, "hello");
        assert_eq!(arg.start, 4);
        assert_eq!(arg.end, 10);
    }

    #[test]
    fn nested_group_is_not_truncated() {
        let text = "{Built \\textbf{real-time} systems} tail";
        let arg = extract_braced(text, 0).unwrap();
        assert_eq!(arg.content, "Built \\textbf{real-time} systems");
        assert_eq!(&text[arg.end..=arg.end], "}");
    }

    #[test]
    fn starts_search_at_offset() {
        let text = "{a}{b}";
        let arg = extract_braced(text, 1).unwrap();
        assert_eq!(arg.content, "b");
        assert_eq!(arg.end, 5);
    }

    #[test]
    fn missing_or_unbalanced_returns_none() {
        assert!(extract_braced("no braces here", 0).is_none());
        assert!(extract_braced("{never {closed}", 0).is_none());
        assert!(extract_braced("{a}", 3).is_none());
        assert!(extract_braced("{a}", 99).is_none());
    }

    #[test]
    fn escaped_braces_do_not_nest() {
        let arg = extract_braced("{set \\{x\\} done}", 0).unwrap();
        assert_eq!(arg.content, "set \\{x\\} done");

        let arg = extract_braced("\\{skip}{take}", 0).unwrap();
        assert_eq!(arg.content, "take");
    }

    #[test]
    fn multibyte_content_is_preserved() {
        let arg = extract_braced("{Zürich – Köln}", 0).unwrap();
        assert_eq!(arg.content, "Zürich – Köln");
    }

    #[test]
    fn next_argument_requires_adjacency() {
        assert_eq!(next_argument("  \n {x}", 0).unwrap().content, "x");
        assert!(next_argument(" text {x}", 0).is_none());
    }

    #[test]
    fn fixed_arguments_collects_in_order() {
        let text = "{A}{B}\n  {C}{D} body";
        let (args, end) = fixed_arguments(text, 0, 4).unwrap();
        assert_eq!(args, ["A", "B", "C", "D"]);
        assert_eq!(&text[end..], " body");
        assert!(fixed_arguments(text, 0, 5).is_none());
    }

    #[test]
    fn find_command_respects_name_boundary() {
        let text = "\\resumeItemListStart \\resumeItem{a} \\resumeItemListEnd";
        let all = find_all_commands(text, "resumeItem");
        assert_eq!(all.len(), 1);
        assert_eq!(&text[all[0].start..all[0].end], "\\resumeItem");
    }

    #[test]
    fn find_command_skips_escaped_backslash() {
        let text = "line\\\\resumeItem{x} \\resumeItem{y}";
        let m = find_command(text, "resumeItem", 0).unwrap();
        assert_eq!(extract_braced(text, m.end).unwrap().content, "y");
    }

    #[test]
    fn find_command_case_sensitive() {
        let text = "\\resumeSubHeadingListStart \\resumeSubheading{x}";
        let all = find_all_commands(text, "resumeSubheading");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].start, 27);
    }
}
