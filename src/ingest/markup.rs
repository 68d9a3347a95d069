//! Inline LaTeX markup cleaning.
//!
//! Cleaning is best-effort and never fails: commands it does not know, or
//! whose arguments do not balance, are left in the text verbatim.

use crate::ingest::args::{fixed_arguments, next_argument};

/// Formatting commands whose single argument is kept.
const UNWRAP_COMMANDS: &[&str] = &[
    "textbf",
    "textit",
    "emph",
    "underline",
    "texttt",
    "textsc",
    "textnormal",
    "small",
    "scshape",
];

/// Declarations that change style and carry no text.
const DECLARATIONS: &[&str] = &[
    "small",
    "scshape",
    "bfseries",
    "itshape",
    "large",
    "Large",
    "footnotesize",
];

/// Control words that stand for a literal string.
const SYMBOL_COMMANDS: &[(&str, &str)] = &[
    ("dash", "\u{2013}"),
    ("textendash", "\u{2013}"),
    ("textemdash", "\u{2014}"),
    ("slash", "/"),
    ("textbar", "|"),
];

/// Clean an extracted field into plain display text.
///
/// Unwraps formatting commands recursively, resolves escapes and dash
/// ligatures, collapses whitespace and trims.
#[must_use]
pub fn clean_inline(text: &str) -> String {
    let unwrapped = unwrap_markup(text);
    let ligatures = unwrapped
        .replace("---", "\u{2014}")
        .replace("--", "\u{2013}");
    collapse_whitespace(&ligatures)
}

/// Whether cleaned text still contains a `\command`.
#[must_use]
pub fn has_unresolved_markup(cleaned: &str) -> bool {
    let bytes = cleaned.as_bytes();
    bytes
        .windows(2)
        .any(|w| w[0] == b'\\' && w[1].is_ascii_alphabetic())
}

/// Remove `$...$` math segments. An unclosed `$` is kept.
#[must_use]
pub fn strip_math(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = find_unescaped(rest, '$') {
        let after = &rest[open + 1..];
        match find_unescaped(after, '$') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Split on commas that are not inside `(...)` or `{...}`.
#[must_use]
pub fn split_list(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '(' | '{' => depth += 1,
            ')' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Drop every remaining backslash.
#[must_use]
pub fn strip_backslashes(text: &str) -> String {
    text.chars().filter(|c| *c != '\\').collect()
}

/// Collapse runs of whitespace to one space and trim.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn find_unescaped(text: &str, needle: char) -> Option<usize> {
    let bytes = text.as_bytes();
    text.match_indices(needle)
        .map(|(i, _)| i)
        .find(|&i| bytes[..i].iter().rev().take_while(|b| **b == b'\\').count() % 2 == 0)
}

fn unwrap_markup(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while let Some(rel) = text[i..].find(['\\', '{', '~']) {
        let at = i + rel;
        out.push_str(&text[i..at]);

        match bytes[at] {
            b'~' => {
                out.push(' ');
                i = at + 1;
            }
            b'{' => match next_argument(text, at) {
                Some(group) => {
                    out.push_str(&unwrap_markup(group.content));
                    i = group.end + 1;
                }
                None => {
                    out.push('{');
                    i = at + 1;
                }
            },
            _ => i = unwrap_command(text, at, &mut out),
        }
    }

    out.push_str(&text[i..]);
    out
}

/// Handle the command starting at the backslash `at`; returns where to resume.
fn unwrap_command(text: &str, at: usize, out: &mut String) -> usize {
    let bytes = text.as_bytes();
    let name_end = at
        + 1
        + bytes[at + 1..]
            .iter()
            .take_while(|b| b.is_ascii_alphabetic())
            .count();

    if name_end == at + 1 {
        return unwrap_escape(text, at, out);
    }

    let name = &text[at + 1..name_end];

    if UNWRAP_COMMANDS.contains(&name) {
        if let Some(arg) = next_argument(text, name_end) {
            out.push_str(&unwrap_markup(arg.content));
            return arg.end + 1;
        }
    }

    if name == "href" {
        if let Some((args, end)) = fixed_arguments(text, name_end, 2) {
            out.push_str(&unwrap_markup(args[1]));
            return end;
        }
    }

    if let Some((_, symbol)) = SYMBOL_COMMANDS.iter().find(|(n, _)| *n == name) {
        // A symbol spaced on the left stays spaced on the right.
        let spaced = out.ends_with(char::is_whitespace);
        out.push_str(symbol);
        return if spaced {
            name_end
        } else {
            skip_control_space(text, name_end)
        };
    }

    if DECLARATIONS.contains(&name) {
        return skip_control_space(text, name_end);
    }

    // Unknown command: keep it with its directly attached arguments.
    let mut end = name_end;
    while bytes.get(end) == Some(&b'{') {
        match next_argument(text, end) {
            Some(arg) => end = arg.end + 1,
            None => break,
        }
    }
    out.push_str(&text[at..end]);
    end
}

/// `\` followed by a non-letter.
fn unwrap_escape(text: &str, at: usize, out: &mut String) -> usize {
    let Some(c) = text[at + 1..].chars().next() else {
        out.push('\\');
        return at + 1;
    };
    match c {
        '%' | '&' | '/' | '#' | '_' | '$' | '{' | '}' => out.push(c),
        '\\' | ',' | ' ' => out.push(' '),
        _ => {
            out.push('\\');
            out.push(c);
        }
    }
    at + 1 + c.len_utf8()
}

/// Control words swallow the whitespace that follows them.
fn skip_control_space(text: &str, from: usize) -> usize {
    from + text[from..]
        .bytes()
        .take_while(u8::is_ascii_whitespace)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_nested_bold() {
        assert_eq!(
            clean_inline("Built \\textbf{real-time} systems"),
            "Built real-time systems"
        );
    }

    #[test]
    fn unwraps_recursively() {
        assert_eq!(
            clean_inline("\\textbf{\\emph{\\underline{deep}} and \\textit{wide}}"),
            "deep and wide"
        );
    }

    #[test]
    fn resolves_escape_table() {
        assert_eq!(
            clean_inline("Full-stack project -- 89\\% \\& more\\/less"),
            "Full-stack project \u{2013} 89% & more/less"
        );
        assert_eq!(clean_inline("C\\# and snake\\_case"), "C# and snake_case");
        assert_eq!(clean_inline("a---b"), "a\u{2014}b");
    }

    #[test]
    fn symbol_commands_keep_surrounding_spacing() {
        assert_eq!(clean_inline("2020 \\dash 2021"), "2020 \u{2013} 2021");
        assert_eq!(clean_inline("2020\\dash 2021"), "2020\u{2013}2021");
        assert_eq!(clean_inline("TCP \\slash IP"), "TCP / IP");
        assert_eq!(clean_inline("2020\\textendash{}2021"), "2020\u{2013}2021");
        assert_eq!(clean_inline("TCP\\slash IP"), "TCP/IP");
    }

    #[test]
    fn href_keeps_link_text() {
        assert_eq!(
            clean_inline("See \\href{https://example.com}{\\underline{my site}}"),
            "See my site"
        );
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(clean_inline("  Led a\n      team\tof~four  "), "Led a team of four");
    }

    #[test]
    fn bare_groups_and_declarations_are_unwrapped() {
        assert_eq!(clean_inline("{\\small Note} here"), "Note here");
        assert_eq!(clean_inline("\\small{\\item x}"), "\\item x");
    }

    #[test]
    fn unbalanced_markup_is_left_verbatim() {
        assert_eq!(clean_inline("Broken \\textbf{bold"), "Broken \\textbf{bold");
        assert!(has_unresolved_markup(&clean_inline("Broken \\textbf{bold")));
    }

    #[test]
    fn unknown_commands_are_left_verbatim() {
        let cleaned = clean_inline("Uses \\LaTeX daily");
        assert_eq!(cleaned, "Uses \\LaTeX daily");
        assert!(has_unresolved_markup(&cleaned));
        assert!(!has_unresolved_markup("plain 50% text"));
    }

    #[test]
    fn trailing_backslash_is_kept() {
        assert_eq!(clean_inline("end\\"), "end\\");
    }

    #[test]
    fn strip_math_removes_segments() {
        assert_eq!(strip_math("a $|$ b $x^2$ c"), "a  b  c");
        assert_eq!(strip_math("cost \\$5 and $open"), "cost \\$5 and $open");
    }

    #[test]
    fn split_list_respects_nesting() {
        assert_eq!(
            split_list("SQL (Postgres, SQLite), \\texttt{a,b}, Rust"),
            ["SQL (Postgres, SQLite)", " \\texttt{a,b}", " Rust"]
        );
        assert_eq!(split_list("one"), ["one"]);
        assert_eq!(split_list("a\\,b,c"), ["a\\,b", "c"]);
    }

    #[test]
    fn strip_backslashes_removes_all() {
        assert_eq!(strip_backslashes("\\LaTeX \\#1"), "LaTeX #1");
    }
}
