//! Rendering: header bar, log pane, footer/help bar.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode};
use crate::theme;

pub fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let chunks = Layout::vertical([
        Constraint::Length(1), // header bar
        Constraint::Min(1),    // log pane
        Constraint::Length(1), // footer bar
    ])
    .split(area);

    render_header(f, app, chunks[0]);
    render_body(f, app, chunks[1]);
    render_footer(f, app, chunks[2]);
}

// ── Header ────────────────────────────────────────────────────────────────────

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let file_name = app
        .tailer
        .path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| app.tailer.path().display().to_string());

    let base = format!(
        " tailview — {}  {}/{} lines",
        file_name,
        app.visible.len(),
        app.sink.len()
    );
    let header_style = Style::default()
        .fg(Color::White)
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![Span::styled(base, header_style)];
    if app.auto_scroll {
        spans.push(Span::styled(
            "  [follow]",
            Style::default().fg(Color::Green).bg(Color::DarkGray),
        ));
    }
    if app.tailer.is_running() && !app.tailer.watcher_installed() {
        spans.push(Span::styled(
            "  [poll-only]",
            Style::default().fg(Color::Yellow).bg(Color::DarkGray),
        ));
    }
    if app.cleared_flash {
        spans.push(Span::styled(
            "  [CLEARED]",
            Style::default()
                .fg(Color::Red)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    f.render_widget(header, area);
}

// ── Log pane ──────────────────────────────────────────────────────────────────

fn render_body(f: &mut Frame, app: &mut App, area: Rect) {
    // Keep the key handler's scroll clamping in sync with the real pane size.
    app.viewport_height = area.height;

    if app.visible.is_empty() {
        let message = if app.sink.is_empty() {
            format!("  waiting for {} ...", app.tailer.path().display())
        } else {
            format!("  {} line(s) hidden by the current filter", app.sink.len())
        };
        let placeholder =
            Paragraph::new(message).style(Style::default().fg(Color::DarkGray));
        f.render_widget(placeholder, area);
        return;
    }

    let height = area.height as usize;
    let start = app.scroll.min(app.visible.len().saturating_sub(1));
    let end = (start + height).min(app.visible.len());

    let lines: Vec<Line> = app.visible[start..end]
        .iter()
        .map(|&idx| {
            let raw = app.sink.lines()[idx].content.as_str();
            let text = theme::strip_display_prefix(raw, &app.strip_prefix);
            match theme::line_color(text) {
                Some(color) => Line::from(Span::styled(
                    text.to_string(),
                    Style::default().fg(color),
                )),
                None => Line::from(text.to_string()),
            }
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);

    // Scroll position indicator, top-right, only when there is overflow.
    if app.visible.len() > height && area.width > 12 {
        let indicator = format!("[{}/{}]", start + 1, app.max_scroll() + 1);
        let indicator_rect = Rect {
            x: area.right().saturating_sub(indicator.len() as u16 + 1),
            y: area.top(),
            width: indicator.len() as u16,
            height: 1,
        };
        let para = Paragraph::new(indicator).style(Style::default().fg(Color::DarkGray));
        f.render_widget(para, indicator_rect);
    }
}

// ── Footer ────────────────────────────────────────────────────────────────────

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let label = match app.mode {
        Mode::View => None,
        Mode::EditFilter => Some("Filter"),
        Mode::EditExclude => Some("Exclude (a;b;c)"),
        Mode::EditPrefix => Some("Strip prefix"),
    };

    let footer = match label {
        None => Paragraph::new(Line::from(
            " j/k scroll  g/G top/bottom  f follow  / filter  x exclude  p prefix  c clear  q quit",
        ))
        .style(Style::default().fg(Color::White).bg(Color::DarkGray)),
        Some(label) => Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {label}: "),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(app.input.clone()),
            Span::styled("█", Style::default().fg(Color::DarkGray)),
        ]))
        .style(Style::default().fg(Color::White).bg(Color::Blue)),
    };
    f.render_widget(footer, area);
}
