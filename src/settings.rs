//! Example preferences state driven through a persisted store
//!
//! Used by the demo host. Only the fields in `Settings::PERSISTED_FIELDS`
//! are written to storage; `scratch` lives for one session.

use serde::{Deserialize, Serialize};

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    System,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::System => "system",
            Theme::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "system" | "auto" => Some(Theme::System),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Smallest and largest font size in points
pub const MIN_FONT_SIZE: u32 = 8;
pub const MAX_FONT_SIZE: u32 = 32;

/// Most-recent-first file list is capped at this length
pub const MAX_RECENT_FILES: usize = 5;

/// User preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub theme: Theme,
    pub font_size: u32,
    pub sidebar_open: bool,
    /// Most recent first
    pub recent_files: Vec<String>,
    /// Page visits counted by the web host
    pub visits: u64,
    /// Session-only; never persisted
    pub scratch: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            font_size: 14,
            sidebar_open: true,
            recent_files: Vec::new(),
            visits: 0,
            scratch: String::new(),
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "persisted_reducer_settings";

    /// Fields written to storage
    pub const PERSISTED_FIELDS: [&'static str; 5] =
        ["theme", "font_size", "sidebar_open", "recent_files", "visits"];
}

/// Requested changes to `Settings`
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsAction {
    SetTheme(Theme),
    FontBigger,
    FontSmaller,
    ToggleSidebar,
    OpenFile(String),
    Visit,
    Note(String),
    Reset,
}

impl SettingsAction {
    /// Parse a command-line token such as `theme=dark`, `font+` or `open=notes.md`
    pub fn parse(token: &str) -> Option<Self> {
        if let Some((name, value)) = token.split_once('=') {
            return match name {
                "theme" => Theme::from_str(value).map(SettingsAction::SetTheme),
                "open" if !value.is_empty() => Some(SettingsAction::OpenFile(value.to_string())),
                "note" => Some(SettingsAction::Note(value.to_string())),
                _ => None,
            };
        }
        match token {
            "font+" => Some(SettingsAction::FontBigger),
            "font-" => Some(SettingsAction::FontSmaller),
            "sidebar" => Some(SettingsAction::ToggleSidebar),
            "visit" => Some(SettingsAction::Visit),
            "reset" => Some(SettingsAction::Reset),
            _ => None,
        }
    }
}

/// Settings reducer
pub fn reduce(state: &Settings, action: SettingsAction) -> Settings {
    let mut next = state.clone();
    match action {
        SettingsAction::SetTheme(theme) => next.theme = theme,
        SettingsAction::FontBigger => {
            next.font_size = state.font_size.saturating_add(1).min(MAX_FONT_SIZE)
        }
        SettingsAction::FontSmaller => {
            next.font_size = state.font_size.saturating_sub(1).max(MIN_FONT_SIZE)
        }
        SettingsAction::ToggleSidebar => next.sidebar_open = !state.sidebar_open,
        SettingsAction::OpenFile(name) => {
            next.recent_files.retain(|f| *f != name);
            next.recent_files.insert(0, name);
            next.recent_files.truncate(MAX_RECENT_FILES);
        }
        SettingsAction::Visit => next.visits = state.visits.saturating_add(1),
        SettingsAction::Note(text) => next.scratch = text,
        SettingsAction::Reset => next = Settings::default(),
    }
    next
}
