//! Persisted theme preference.
//!
//! The store is a small JSON object on disk. Only the `"theme"` key is owned by
//! the dashboard; other keys are preserved on save.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use rate_common::{FeedError, Result, Theme};
use serde_json::{Map, Value};

const THEME_KEY: &str = "theme";

/// Key-value file holding the theme preference.
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    /// Store backed by the JSON file at `path`; the file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved theme, or the default when nothing valid is stored.
    pub fn load(&self) -> Result<Theme> {
        let entries = self.read_entries()?;
        let theme = match entries.get(THEME_KEY).and_then(Value::as_str) {
            Some(raw) => raw.parse::<Theme>().unwrap_or_else(|_| {
                warn!("Ignoring unknown theme {:?} in {}", raw, self.path.display());
                Theme::default()
            }),
            None => Theme::default(),
        };
        Ok(theme)
    }

    /// Stores `theme`, keeping any other entries in the file.
    pub fn save(&self, theme: Theme) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(THEME_KEY.to_string(), Value::String(theme.to_string()));
        fs::write(&self.path, serde_json::to_vec_pretty(&entries)?)?;
        debug!("Saved theme {} to {}", theme, self.path.display());
        Ok(())
    }

    fn read_entries(&self) -> Result<Map<String, Value>> {
        if !self.path.is_file() {
            return Ok(Map::new());
        }
        let bytes = fs::read(&self.path)?;
        match serde_json::from_slice::<Value>(&bytes)? {
            Value::Object(entries) => Ok(entries),
            _ => Err(FeedError::Config(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
        }
    }
}
