//! Trigger sources: filesystem notifications plus a fixed-interval timer.
//!
//! Two independent triggers feed the same poll entry point. The notifier
//! reacts promptly to writes/creates/deletes/renames of the target file;
//! the timer fires unconditionally so progress is guaranteed even where
//! notifications are unreliable or coalesced (network mounts, some
//! containers). Both may fire concurrently — the reader's re-entrancy
//! guard is the sole synchronization point, so triggering is always safe.

use std::ffi::OsStr;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

type Trigger = Arc<dyn Fn() + Send + Sync>;

/// Owns the timer thread and the (optional) filesystem watcher. Dropping
/// it stops the timer and uninstalls the watcher; a poll already in flight
/// finishes naturally.
pub struct ChangeSource {
    cancel: Arc<AtomicBool>,
    timer: Option<JoinHandle<()>>,
    /// Kept alive for its side effect; dropping unwatches.
    watcher: Option<RecommendedWatcher>,
}

impl ChangeSource {
    /// Start both triggers for `path`, invoking `trigger` on every firing.
    ///
    /// If the parent directory does not exist or the watcher cannot be
    /// installed, degrades to timer-only operation with a warning — never
    /// an error, since the timer alone keeps the tail live.
    pub fn spawn<F>(path: &Path, interval: Duration, trigger: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let trigger: Trigger = Arc::new(trigger);
        let watcher = install_watcher(path, Arc::clone(&trigger));
        let cancel = Arc::new(AtomicBool::new(false));

        let timer = {
            let cancel = Arc::clone(&cancel);
            let trigger = Arc::clone(&trigger);
            thread::Builder::new()
                .name("tailview-timer".into())
                .spawn(move || {
                    while !cancel.load(Ordering::Relaxed) {
                        trigger();
                        thread::sleep(interval);
                    }
                })
        };
        let timer = match timer {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::error!("failed to start timer thread: {err}");
                None
            }
        };

        Self {
            cancel,
            timer,
            watcher,
        }
    }

    /// False when running in timer-only fallback mode.
    pub fn watcher_installed(&self) -> bool {
        self.watcher.is_some()
    }
}

impl Drop for ChangeSource {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        if let Some(handle) = self.timer.take() {
            let _ = handle.join();
        }
    }
}

/// Watch `path`'s parent directory, filtered to events that touch the exact
/// target file name. Returns `None` (with a warning) on any setup problem.
fn install_watcher(path: &Path, trigger: Trigger) -> Option<RecommendedWatcher> {
    let Some(file_name) = path.file_name().map(OsStr::to_os_string) else {
        log::warn!("{} has no file name; notifications disabled", path.display());
        return None;
    };
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        log::warn!("{} has no parent directory; notifications disabled", path.display());
        return None;
    };
    if !parent.is_dir() {
        log::warn!(
            "{} does not exist; falling back to timer polling only",
            parent.display()
        );
        return None;
    }

    let handler = move |res: notify::Result<Event>| match res {
        Ok(event) if touches_file(&event, &file_name) => trigger(),
        Ok(_) => {}
        Err(err) => log::warn!("filesystem watch error: {err}"),
    };

    let mut watcher = match notify::recommended_watcher(handler) {
        Ok(w) => w,
        Err(err) => {
            log::warn!("could not create filesystem watcher: {err}; timer polling only");
            return None;
        }
    };
    if let Err(err) = watcher.watch(parent, RecursiveMode::NonRecursive) {
        log::warn!(
            "could not watch {}: {err}; timer polling only",
            parent.display()
        );
        return None;
    }
    Some(watcher)
}

/// Write, create, remove, and rename kinds are all relevant; access events
/// and catch-all kinds are noise.
fn touches_file(event: &Event, file_name: &OsStr) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p.file_name() == Some(file_name))
}
