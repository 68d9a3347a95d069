use crate::ingest::args::{find_all_commands, find_command, fixed_arguments, next_argument};

/// One record-marker occurrence with its fixed arguments and trailing body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord<'a> {
    /// Raw (uncleaned) fixed arguments, in order.
    pub args: Vec<&'a str>,
    /// Text from the end of the last fixed argument to the next marker.
    pub body: &'a str,
    /// Byte offset of the marker within the section.
    pub offset: usize,
}

/// Malformed marker occurrence that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRecord<'a> {
    pub offset: usize,
    /// Start of the text following the marker, for diagnostics.
    pub snippet: &'a str,
}

/// Result of scanning one section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome<'a> {
    pub records: Vec<RawRecord<'a>>,
    pub dropped: Vec<DroppedRecord<'a>>,
}

/// Scans a section for `\marker{..}{..}...` records with a fixed arity.
///
/// Each record's arguments must close before the next marker starts, so a
/// malformed record can never swallow its successor.
pub struct RecordScanner<'m> {
    marker: &'m str,
    arity: usize,
}

impl<'m> RecordScanner<'m> {
    #[must_use]
    pub fn new(marker: &'m str, arity: usize) -> Self {
        Self { marker, arity }
    }

    #[must_use]
    pub fn scan<'a>(&self, section: &'a str) -> ScanOutcome<'a> {
        let markers = find_all_commands(section, self.marker);
        let mut outcome = ScanOutcome::default();

        for (idx, marker) in markers.iter().enumerate() {
            let window_end = markers.get(idx + 1).map_or(section.len(), |next| next.start);
            let window = &section[..window_end];

            match fixed_arguments(window, marker.end, self.arity) {
                Some((args, body_start)) => outcome.records.push(RawRecord {
                    args,
                    body: &window[body_start..],
                    offset: marker.start,
                }),
                None => outcome.dropped.push(DroppedRecord {
                    offset: marker.start,
                    snippet: snippet(&window[marker.end..]),
                }),
            }
        }

        outcome
    }
}

/// Raw arguments of every `\item_marker{...}` in a record body, in order.
///
/// A marker without a balanced argument is skipped.
#[must_use]
pub fn extract_items<'a>(body: &'a str, item_marker: &str) -> Vec<&'a str> {
    let mut items = Vec::new();
    let mut pos = 0;
    while let Some(m) = find_command(body, item_marker, pos) {
        match next_argument(body, m.end) {
            Some(arg) => {
                items.push(arg.content);
                pos = arg.end + 1;
            }
            None => pos = m.end,
        }
    }
    items
}

fn snippet(text: &str) -> &str {
    let line = text.trim_start().lines().next().unwrap_or("");
    match line.char_indices().nth(60) {
        Some((cut, _)) => &line[..cut],
        None => line,
    }
}
