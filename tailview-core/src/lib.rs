//! Incremental log-file tailing engine.
//!
//! Watches a single growing text file and surfaces newly appended lines to a
//! consumer, tolerating rotation, truncation, deletion, and concurrent writer
//! access. The pieces, leaf-first:
//!
//! - [`tracker::PositionTracker`] — the last-read byte offset, pure state.
//! - [`reader::TailReader`] — one non-reentrant poll: detect shrink/deletion,
//!   seek, decode complete lines, advance the offset.
//! - [`source::ChangeSource`] — dual trigger: a filesystem notifier plus a
//!   fixed-interval timer, both funneled into the same poll.
//! - [`bridge::DeliveryBridge`] — FIFO handoff of poll outcomes to the single
//!   thread that owns consumer-visible state.
//! - [`sink::LineSink`] — the ordered, append-only line collection the
//!   consumer renders from.
//! - [`tailer::LogTailer`] — facade wiring all of the above together.
//!
//! The engine never surfaces errors to the consumer: a poll either yields
//! new lines, a wholesale clear, or silence. A viewer should stay alive
//! while the producing process misbehaves, so I/O trouble is logged and
//! retried on the next trigger instead of propagated.

pub mod bridge;
pub mod reader;
pub mod sink;
pub mod source;
pub mod tailer;
pub mod tracker;

pub use bridge::{DeliveryBridge, DeliveryQueue};
pub use reader::{ClearReason, LogLine, PollOutcome, TailReader};
pub use sink::{LineSink, SinkChange};
pub use source::ChangeSource;
pub use tailer::LogTailer;
pub use tracker::PositionTracker;
