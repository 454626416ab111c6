/// Key event handling and mode-specific dispatch.
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, Mode};

impl App {
    /// Dispatch a key event to the mode-appropriate handler.
    /// Returns `true` if the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.mode {
            Mode::View => self.handle_view_key(key),
            Mode::EditFilter | Mode::EditExclude | Mode::EditPrefix => {
                self.handle_edit_key(key);
                false
            }
        }
    }

    fn handle_view_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers != KeyModifiers::NONE && key.modifiers != KeyModifiers::SHIFT {
            return false;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('j') | KeyCode::Down => {
                self.auto_scroll = false;
                self.scroll = (self.scroll + 1).min(self.max_scroll());
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.auto_scroll = false;
                self.scroll = self.scroll.saturating_sub(1);
            }
            KeyCode::Char('g') => {
                self.auto_scroll = false;
                self.scroll = 0;
            }
            KeyCode::Char('G') => {
                self.auto_scroll = true;
                self.snap_to_bottom();
            }
            KeyCode::Char('f') => {
                self.auto_scroll = !self.auto_scroll;
                if self.auto_scroll {
                    self.snap_to_bottom();
                }
            }
            KeyCode::Char('c') => self.clear_view(),
            KeyCode::Char('/') => self.enter_edit(Mode::EditFilter),
            KeyCode::Char('x') => self.enter_edit(Mode::EditExclude),
            KeyCode::Char('p') => self.enter_edit(Mode::EditPrefix),
            _ => {}
        }
        false
    }

    fn enter_edit(&mut self, mode: Mode) {
        self.input = match mode {
            Mode::EditFilter => self.filter.include.clone(),
            Mode::EditExclude => self.filter.exclude.clone(),
            Mode::EditPrefix => self.strip_prefix.clone(),
            Mode::View => return,
        };
        self.mode = mode;
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                // Discard the edit.
                self.input.clear();
                self.mode = Mode::View;
            }
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
            }
            _ => {}
        }
    }

    fn commit_edit(&mut self) {
        let value = std::mem::take(&mut self.input);
        match self.mode {
            Mode::EditFilter => self.filter.include = value,
            Mode::EditExclude => self.filter.exclude = value,
            Mode::EditPrefix => self.strip_prefix = value,
            Mode::View => {}
        }
        self.mode = Mode::View;
        self.refresh_visible();
        if self.auto_scroll {
            self.snap_to_bottom();
        }
        self.save_settings();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
