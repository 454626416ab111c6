//! Line highlighting: an immutable tag-substring → color table, built into
//! the binary and looked up read-only. First match wins, matching is
//! case-insensitive.

use ratatui::style::Color;

pub struct HighlightRule {
    pub needle: &'static str,
    pub color: Color,
}

/// Ordered by severity so `[fatal`/`[error` take precedence when a line
/// carries several tags.
pub const HIGHLIGHTS: &[HighlightRule] = &[
    HighlightRule { needle: "[fatal", color: Color::Red },
    HighlightRule { needle: "[error", color: Color::Red },
    HighlightRule { needle: "[warning", color: Color::Yellow },
    HighlightRule { needle: "[warn", color: Color::Yellow },
    HighlightRule { needle: "[message", color: Color::Green },
    HighlightRule { needle: "[info", color: Color::Blue },
    HighlightRule { needle: "[debug", color: Color::DarkGray },
];

/// Color for a log line, or `None` for the default foreground.
pub fn line_color(text: &str) -> Option<Color> {
    let lower = text.to_lowercase();
    HIGHLIGHTS
        .iter()
        .find(|rule| lower.contains(rule.needle))
        .map(|rule| rule.color)
}

/// Remove `prefix` from the start of `text` (case-insensitive), plus any
/// whitespace that followed it. Returns `text` unchanged when the prefix
/// does not match or is empty.
pub fn strip_display_prefix<'a>(text: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() || text.len() < prefix.len() {
        return text;
    }
    // get() rather than slicing: the cut may land inside a multi-byte char.
    let Some(head) = text.get(..prefix.len()) else {
        return text;
    };
    if head.eq_ignore_ascii_case(prefix) {
        text[prefix.len()..].trim_start()
    } else {
        text
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
