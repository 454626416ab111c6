/// Byte-offset bookkeeping for the tailed file — pure state, no I/O.
///
/// The tracker records how far into the file the reader has consumed.
/// Immediately after a successful poll the offset never exceeds the file
/// length; the reader treats a violation of that invariant as truncation
/// and resets to zero.
#[derive(Debug, Default)]
pub struct PositionTracker {
    offset: u64,
}

impl PositionTracker {
    /// Start at offset 0, so a pre-existing file is replayed in full on the
    /// first poll.
    pub fn new() -> Self {
        Self { offset: 0 }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Record the stream position after a read. Called only with positions
    /// at or past the current offset.
    pub fn advance_to(&mut self, offset: u64) {
        debug_assert!(offset >= self.offset);
        self.offset = offset;
    }

    /// Forget all progress. Used when the file shrank or disappeared.
    pub fn reset(&mut self) {
        self.offset = 0;
    }
}
