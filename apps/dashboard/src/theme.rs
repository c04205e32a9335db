use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::storage::{Storage, StorageError};

/// The only preference kept client-side.
pub const THEME_KEY: &str = "vite-ui-theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemePreference {
    Light,
    #[default]
    Dark,
    System,
}

#[derive(Debug, Error)]
#[error("Unknown theme '{0}' (expected light, dark or system)")]
pub struct UnknownTheme(String);

impl FromStr for ThemePreference {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" => Ok(ThemePreference::System),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        })
    }
}

impl ThemePreference {
    /// Stored preference, falling back to the default when absent or unreadable.
    pub fn load(storage: &Storage) -> Self {
        storage
            .get(THEME_KEY)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub fn save(self, storage: &mut Storage) -> Result<(), StorageError> {
        storage.set(THEME_KEY, self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dark() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path().join("state.json")).unwrap();
        assert_eq!(ThemePreference::load(&storage), ThemePreference::Dark);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = Storage::open(dir.path().join("state.json")).unwrap();

        ThemePreference::System.save(&mut storage).unwrap();
        assert_eq!(storage.get(THEME_KEY), Some("system"));
        assert_eq!(ThemePreference::load(&storage), ThemePreference::System);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!("Light".parse::<ThemePreference>().unwrap(), ThemePreference::Light);
        assert!("sepia".parse::<ThemePreference>().is_err());
    }
}
