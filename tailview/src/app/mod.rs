//! Viewer state: the line sink, the filtered visible set, scroll/follow
//! behavior, and the filter-edit modes.

mod input;

use std::path::PathBuf;
use std::time::Duration;

use tailview_core::{LineSink, LogTailer, SinkChange};

use crate::config::{self, Settings};
use crate::filter::FilterSpec;

// ── Mode ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    EditFilter,
    EditExclude,
    EditPrefix,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    pub tailer: LogTailer,
    pub sink: LineSink,
    pub filter: FilterSpec,
    pub strip_prefix: String,
    /// Indices into the sink of lines that pass the filter, in order.
    pub visible: Vec<usize>,
    /// Index into `visible` of the first rendered line.
    pub scroll: usize,
    /// If true, keep the view pinned to the newest line.
    pub auto_scroll: bool,
    /// Height of the log pane viewport (updated by ui::render).
    pub viewport_height: u16,
    pub mode: Mode,
    /// Edit buffer while one of the filter fields is being edited.
    pub input: String,
    /// Set when the source was rotated/deleted; shown in the header until
    /// new content arrives.
    pub cleared_flash: bool,
    settings_path: PathBuf,
}

impl App {
    /// Build the viewer and replay any pre-existing file content. The
    /// replay runs synchronously on this thread, before any background
    /// trigger exists, so it applies directly without a delivery hop.
    /// Call [`start`](Self::start) afterwards to begin live tailing.
    pub fn new(
        path: PathBuf,
        interval: Duration,
        settings: Settings,
        settings_path: PathBuf,
    ) -> Self {
        let mut app = Self {
            tailer: LogTailer::new(path, interval),
            sink: LineSink::new(),
            filter: FilterSpec::new(settings.filter, settings.exclude),
            strip_prefix: settings.strip_prefix,
            visible: Vec::new(),
            scroll: 0,
            auto_scroll: true,
            viewport_height: 20,
            mode: Mode::View,
            input: String::new(),
            cleared_flash: false,
            settings_path,
        };
        let outcome = app.tailer.poll_now();
        let change = app.sink.apply(outcome);
        app.apply_change(change);
        app
    }

    pub fn start(&mut self) {
        self.tailer.start();
    }

    /// Drain pending deliveries onto the sink. Called once per UI tick.
    pub fn on_tick(&mut self) {
        let change = self.tailer.drain_into(&mut self.sink);
        self.apply_change(change);
    }

    fn apply_change(&mut self, change: SinkChange) {
        match change {
            SinkChange::None => {}
            SinkChange::Appended(_) => {
                self.cleared_flash = false;
                self.refresh_visible();
                if self.auto_scroll {
                    self.snap_to_bottom();
                }
            }
            SinkChange::Cleared(_) => {
                self.cleared_flash = true;
                self.scroll = 0;
                self.refresh_visible();
                if self.auto_scroll {
                    self.snap_to_bottom();
                }
            }
        }
    }

    /// Drop everything collected so far. New deliveries keep arriving;
    /// only the on-screen history is discarded.
    pub fn clear_view(&mut self) {
        self.sink.clear();
        self.scroll = 0;
        self.refresh_visible();
    }

    /// Recompute which sink lines pass the filter and clamp the scroll.
    pub fn refresh_visible(&mut self) {
        if self.filter.is_passthrough() {
            self.visible = (0..self.sink.len()).collect();
        } else {
            self.visible = self
                .sink
                .lines()
                .iter()
                .enumerate()
                .filter(|(_, line)| self.filter.matches(&line.content))
                .map(|(i, _)| i)
                .collect();
        }
        self.clamp_scroll();
    }

    pub fn max_scroll(&self) -> usize {
        self.visible
            .len()
            .saturating_sub(self.viewport_height as usize)
    }

    pub fn snap_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Persist the current filter fields. Failures are logged, never fatal.
    pub fn save_settings(&self) {
        let settings = Settings {
            filter: self.filter.include.clone(),
            exclude: self.filter.exclude.clone(),
            strip_prefix: self.strip_prefix.clone(),
        };
        if let Err(err) = config::save(&self.settings_path, &settings) {
            log::warn!("could not save settings: {err:#}");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
