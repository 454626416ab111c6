//! Persisted viewer settings: filter text, exclude terms, strip prefix.
//!
//! Stored as a `KEY=value` file so it can be read and edited by hand.
//! Location: `$TAILVIEW_CONFIG` if set, else
//! `$XDG_CONFIG_HOME/tailview/settings`, else
//! `$HOME/.config/tailview/settings`.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub filter: String,
    pub exclude: String,
    pub strip_prefix: String,
}

pub fn settings_path() -> PathBuf {
    if let Ok(path) = std::env::var("TAILVIEW_CONFIG") {
        return PathBuf::from(path);
    }
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("tailview").join("settings");
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| String::from("."));
    PathBuf::from(home)
        .join(".config")
        .join("tailview")
        .join("settings")
}

/// Load settings, falling back to defaults when the file is missing or
/// unreadable — a broken settings file must never keep the viewer from
/// starting.
pub fn load(path: &Path) -> Settings {
    let Ok(content) = fs::read_to_string(path) else {
        return Settings::default();
    };
    let vars = parse_settings(&content);
    Settings {
        filter: vars.get("FILTER").cloned().unwrap_or_default(),
        exclude: vars.get("EXCLUDE").cloned().unwrap_or_default(),
        strip_prefix: vars.get("STRIP_PREFIX").cloned().unwrap_or_default(),
    }
}

pub fn save(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = format!(
        "# tailview settings\nFILTER=\"{}\"\nEXCLUDE=\"{}\"\nSTRIP_PREFIX=\"{}\"\n",
        settings.filter, settings.exclude, settings.strip_prefix
    );
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn parse_settings(content: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, val)) = line.split_once('=') {
            vars.insert(key.trim().to_string(), unquote(val).to_string());
        }
    }
    vars
}

/// Strip one matched pair of surrounding quotes, leaving inner quotes
/// untouched so saved values round-trip verbatim.
fn unquote(val: &str) -> &str {
    for quote in ['"', '\''] {
        if val.len() >= 2 && val.starts_with(quote) && val.ends_with(quote) {
            return &val[1..val.len() - 1];
        }
    }
    val
}

// ── Tests ─────────────────────────────────────────────────────────────────────
