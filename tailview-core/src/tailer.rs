//! Facade wiring reader, trigger sources, and delivery together.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::bridge::{DeliveryBridge, DeliveryQueue};
use crate::reader::{PollOutcome, TailReader};
use crate::sink::{LineSink, SinkChange};
use crate::source::ChangeSource;

/// Timer cadence used when the caller has no opinion.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

/// One tailed file: construct, replay, start, drain, stop.
///
/// Typical use from the consumer thread:
///
/// ```no_run
/// use tailview_core::{LineSink, LogTailer};
///
/// let mut sink = LineSink::new();
/// let mut tailer = LogTailer::new("app.log", tailview_core::tailer::DEFAULT_INTERVAL);
/// sink.apply(tailer.poll_now()); // surface pre-existing content
/// tailer.start();
/// loop {
///     let change = tailer.drain_into(&mut sink);
///     // render, react to `change`, handle input...
///     # let _ = change; break;
/// }
/// ```
pub struct LogTailer {
    reader: Arc<TailReader>,
    bridge: DeliveryBridge,
    queue: DeliveryQueue,
    interval: Duration,
    source: Option<ChangeSource>,
}

impl LogTailer {
    /// Set up tailing of `path` without starting any background trigger.
    /// The file may not exist yet; it is picked up when it appears.
    pub fn new(path: impl Into<PathBuf>, interval: Duration) -> Self {
        let (bridge, queue) = DeliveryBridge::channel();
        Self {
            reader: Arc::new(TailReader::new(path)),
            bridge,
            queue,
            interval,
            source: None,
        }
    }

    pub fn path(&self) -> &Path {
        self.reader.path()
    }

    /// Run one poll synchronously and hand the outcome to the caller for
    /// direct application — no scheduling hop. Intended for the startup
    /// replay of pre-existing content, before [`start`](Self::start);
    /// once background triggers run, outcomes must flow through
    /// [`drain_into`](Self::drain_into) to keep their order.
    pub fn poll_now(&self) -> PollOutcome {
        self.reader.poll()
    }

    /// Install the filesystem notifier and start the poll timer.
    pub fn start(&mut self) {
        if self.source.is_some() {
            return;
        }
        let reader = Arc::clone(&self.reader);
        let bridge = self.bridge.clone();
        self.source = Some(ChangeSource::spawn(
            self.reader.path(),
            self.interval,
            move || reader.poll_into(&bridge),
        ));
    }

    /// True while triggers are running.
    pub fn is_running(&self) -> bool {
        self.source.is_some()
    }

    /// False when filesystem notifications could not be installed and the
    /// tail is riding on the timer alone.
    pub fn watcher_installed(&self) -> bool {
        self.source
            .as_ref()
            .is_some_and(ChangeSource::watcher_installed)
    }

    /// Apply all pending deliveries to `sink`, in order, without blocking.
    /// Call from the thread that owns the sink.
    pub fn drain_into(&self, sink: &mut LineSink) -> SinkChange {
        self.queue.drain_into(sink)
    }

    /// Stop the timer and uninstall the notifier. A poll already in flight
    /// finishes naturally; its outcome stays queued and is either drained
    /// later or dropped with the tailer.
    pub fn stop(&mut self) {
        self.source = None;
    }
}
