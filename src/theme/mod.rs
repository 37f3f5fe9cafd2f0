//! Theme module - the light/dark preference and its persistence

mod scheme;
mod storage;
mod store;

pub use scheme::system_theme;
#[cfg(test)]
pub(crate) use storage::memory::MemoryStore;
pub use storage::{FileStore, KeyValueStore, DATA_DIR};
pub use store::{ThemeStore, STORAGE_KEY};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Marker stored and applied for the light theme
pub const LIGHT: &str = "silk";
/// Marker stored and applied for the dark theme
pub const DARK: &str = "black";

/// Color theme of the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Error for strings that name no theme
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown theme {0:?}, expected light, dark, silk or black")]
pub struct ParseThemeError(pub String);

impl Theme {
    /// The persisted and applied marker
    pub const fn marker(self) -> &'static str {
        match self {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }

    /// Parse a stored marker; only exact markers are accepted
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            LIGHT => Some(Theme::Light),
            DARK => Some(Theme::Dark),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub const fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }
}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" | LIGHT => Ok(Theme::Light),
            "dark" | DARK => Ok(Theme::Dark),
            _ => Err(ParseThemeError(s.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers() {
        assert_eq!(Theme::Light.marker(), "silk");
        assert_eq!(Theme::Dark.marker(), "black");
        assert_eq!(Theme::from_marker("black"), Some(Theme::Dark));
        assert_eq!(Theme::from_marker("dark"), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("silk".parse::<Theme>(), Ok(Theme::Light));
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_toggled() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
