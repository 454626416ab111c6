//! The ordered, append-only line collection the consumer renders from.
//!
//! Mutated only on the designated consumer thread; insertion order equals
//! arrival order equals file order. The only wholesale mutation is the
//! clear that follows truncation or deletion of the source file.

use crate::reader::{LogLine, PollOutcome};

/// What a single applied outcome did to the sink, so the consumer can
/// react (auto-scroll on append, reset the view on clear).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkChange {
    None,
    /// `n` lines were appended.
    Appended(usize),
    /// The view was wiped; `n` lines were appended after the wipe.
    Cleared(usize),
}

#[derive(Debug, Default)]
pub struct LineSink {
    lines: Vec<LogLine>,
}

impl LineSink {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn append(&mut self, lines: Vec<LogLine>) -> usize {
        let n = lines.len();
        self.lines.extend(lines);
        n
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Fold one poll outcome into the sink. A `Cleared` outcome reports
    /// `Cleared` even when its batch is empty — the consumer must still
    /// wipe its view.
    pub fn apply(&mut self, outcome: PollOutcome) -> SinkChange {
        match outcome {
            PollOutcome::NoChange => SinkChange::None,
            PollOutcome::Appended(lines) => SinkChange::Appended(self.append(lines)),
            PollOutcome::Cleared { lines, .. } => {
                self.clear();
                SinkChange::Cleared(self.append(lines))
            }
        }
    }
}
