//! The poll operation: open, detect shrink/deletion, seek, decode, advance.
//!
//! A `TailReader` is shared between every trigger source. Polls never
//! overlap: the tracker sits behind a mutex acquired with a non-blocking
//! attempt, so concurrent triggers collapse into the one in-flight poll
//! instead of queueing behind it. Errors never cross the poll boundary —
//! the caller only ever sees an outcome.

use std::fs::File;
use std::io::{self, ErrorKind, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, TryLockError};

use crate::bridge::DeliveryBridge;
use crate::tracker::PositionTracker;

/// One decoded log line, terminator stripped. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub content: String,
}

impl LogLine {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Why the consumer's view was wiped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearReason {
    /// The file disappeared after content had been read from it.
    Deleted,
    /// The file is shorter than the last read position — rotated or
    /// overwritten in place.
    Truncated,
}

/// Result of one poll attempt.
///
/// A truncation clear and the re-read from offset 0 that follows it in the
/// same pass are carried together in `Cleared`, so the consumer applies
/// clear-then-append as one step and can never observe stale lines mixed
/// with new ones. `Cleared` with an empty batch is valid and still obliges
/// the consumer to wipe its view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Nothing new, or the poll was suppressed/failed. No consumer mutation.
    NoChange,
    /// The source was rotated or deleted; drop everything, then show `lines`.
    Cleared {
        reason: ClearReason,
        lines: Vec<LogLine>,
    },
    /// New complete (or trailing-partial) lines appended in file order.
    Appended(Vec<LogLine>),
}

impl PollOutcome {
    pub fn is_no_change(&self) -> bool {
        matches!(self, PollOutcome::NoChange)
    }
}

/// Owns the read operation and the tracked offset for one file.
///
/// Known limitation: a trailing line that has no terminator yet is emitted
/// immediately rather than withheld, so a write that lands mid-line can
/// split one logical line across two delivered entries.
pub struct TailReader {
    path: PathBuf,
    tracker: Mutex<PositionTracker>,
    /// Latch so a persistent unrecoverable failure is logged once per
    /// streak, not once per 100ms tick. Reset by the next successful poll.
    fault_logged: AtomicBool,
}

impl TailReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tracker: Mutex::new(PositionTracker::new()),
            fault_logged: AtomicBool::new(false),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run one poll and return its outcome.
    ///
    /// If another poll is already in flight, returns `NoChange` immediately
    /// without blocking — the in-flight poll will pick up whatever this
    /// trigger would have seen.
    pub fn poll(&self) -> PollOutcome {
        let mut tracker = match self.tracker.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => return PollOutcome::NoChange,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        };
        self.poll_locked(&mut tracker)
    }

    /// Run one poll and hand any non-empty outcome to `bridge` while the
    /// guard is still held, so delivery order on the channel matches offset
    /// order. This is the entry point trigger sources use.
    pub fn poll_into(&self, bridge: &DeliveryBridge) {
        let mut tracker = match self.tracker.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => return,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        };
        let outcome = self.poll_locked(&mut tracker);
        if !outcome.is_no_change() {
            bridge.deliver(outcome);
        }
    }

    fn poll_locked(&self, tracker: &mut PositionTracker) -> PollOutcome {
        match self.read_new(tracker) {
            Ok(outcome) => {
                self.fault_logged.store(false, Ordering::Relaxed);
                outcome
            }
            Err(err) => {
                match err.kind() {
                    // Contention with the writer, or the file vanished
                    // between open and stat. The next trigger retries.
                    ErrorKind::Interrupted | ErrorKind::WouldBlock | ErrorKind::NotFound => {
                        log::debug!("transient read error on {}: {err}", self.path.display());
                    }
                    _ => {
                        if !self.fault_logged.swap(true, Ordering::Relaxed) {
                            log::error!("tailing {} failed: {err}", self.path.display());
                        }
                    }
                }
                PollOutcome::NoChange
            }
        }
    }

    fn read_new(&self, tracker: &mut PositionTracker) -> io::Result<PollOutcome> {
        // A plain read-only open imposes no sharing restrictions on the
        // producing process, on Unix or Windows.
        let mut file = match File::open(&self.path) {
            Ok(f) => f,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                if tracker.offset() > 0 {
                    log::debug!("{} deleted; clearing", self.path.display());
                    tracker.reset();
                    return Ok(PollOutcome::Cleared {
                        reason: ClearReason::Deleted,
                        lines: Vec::new(),
                    });
                }
                // Not created yet — keep waiting for it to appear.
                return Ok(PollOutcome::NoChange);
            }
            Err(err) => return Err(err),
        };

        let len = file.metadata()?.len();
        let mut truncated = false;
        if len < tracker.offset() {
            log::debug!(
                "{} truncated: offset {} > length {len}; re-reading from start",
                self.path.display(),
                tracker.offset()
            );
            tracker.reset();
            truncated = true;
        }

        if len == tracker.offset() {
            return Ok(if truncated {
                PollOutcome::Cleared {
                    reason: ClearReason::Truncated,
                    lines: Vec::new(),
                }
            } else {
                PollOutcome::NoChange
            });
        }

        file.seek(SeekFrom::Start(tracker.offset()))?;
        let mut buf = Vec::new();
        let read = file.read_to_end(&mut buf)?;
        // Offset advances by exactly the bytes consumed, in the same guarded
        // section that emits the lines — no gap for a second poll to slip
        // into and double-read.
        tracker.advance_to(tracker.offset() + read as u64);
        let lines = decode_lines(&buf);

        Ok(if truncated {
            PollOutcome::Cleared {
                reason: ClearReason::Truncated,
                lines,
            }
        } else if lines.is_empty() {
            PollOutcome::NoChange
        } else {
            PollOutcome::Appended(lines)
        })
    }
}

/// Best-effort UTF-8 decode and line split.
///
/// Malformed byte sequences are substituted, never abort a poll. `\n`
/// terminates a line; a trailing `\r` is stripped so CRLF logs read clean.
/// Bytes after the final terminator form a partial line and are emitted
/// as-is.
fn decode_lines(bytes: &[u8]) -> Vec<LogLine> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let text = String::from_utf8_lossy(bytes);
    let mut segments: Vec<&str> = text.split('\n').collect();
    if text.ends_with('\n') {
        segments.pop();
    }
    segments
        .into_iter()
        .map(|s| LogLine::new(s.strip_suffix('\r').unwrap_or(s)))
        .collect()
}
