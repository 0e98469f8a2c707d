//! Theme preference service.
//!
//! The theme is the only user state that outlives a session. It lives in a
//! key-value store under [`THEME_KEY`]; the service keeps the active value
//! in memory and writes through on every change.

pub mod store;

use anyhow::Result;
use serde::Serialize;

pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Store key holding the theme name.
pub const THEME_KEY: &str = "theme";

/// Visual mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Parse a stored or submitted value. Anything other than `dark`
    /// (case-insensitive, surrounding whitespace ignored) is light.
    pub fn from_stored(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("dark") {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Strict parse for user input on the command line.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Display label, e.g. `Dark`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Theme settings backed by an injected store.
pub struct SettingsService<S: KeyValueStore> {
    store: S,
    theme: Theme,
}

impl<S: KeyValueStore> SettingsService<S> {
    /// Load the persisted theme (light when absent or unrecognized) and
    /// make it the active mode.
    pub fn load(store: S) -> Self {
        let theme = store
            .get(THEME_KEY)
            .map(|v| Theme::from_stored(&v))
            .unwrap_or_default();
        Self { store, theme }
    }

    /// The active theme.
    pub fn get(&self) -> Theme {
        self.theme
    }

    /// Switch theme and persist it.
    ///
    /// The in-memory selection changes even if the write fails; the error
    /// is returned so the caller can report it.
    pub fn set(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        self.store.set(THEME_KEY, theme.as_str())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
