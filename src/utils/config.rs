//! Application configuration
//!
//! Settings live in a flat JSON file. Loading merges the file over the
//! defaults: keys present in the file always win, missing keys are
//! back-filled, and unknown keys are carried through to the next save.

use crate::utils::bundle_paths::get_downloads_dir;
use anyhow::{Context, Result};
use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Container used for merged video+audio output when nothing is configured.
pub const DEFAULT_CONTAINER: &str = "mp4";

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Download location
    pub download_path: PathBuf,

    /// Output container for merged downloads (mp4, mkv, webm)
    pub format: String,

    /// Keys this version doesn't know about, preserved on save
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            download_path: get_downloads_dir(),
            format: DEFAULT_CONTAINER.to_string(),
            extra: serde_json::Map::new(),
        }
    }
}

impl Settings {
    /// Update the download location from user input.
    ///
    /// Relative input is resolved against the current directory; blank input
    /// is ignored.
    pub fn set_download_path(&mut self, raw: &str) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }
        let path = Path::new(trimmed);
        self.download_path = match path.absolutize() {
            Ok(abs) => abs.into_owned(),
            Err(_) => path.to_path_buf(),
        };
    }

    /// Update the container format from user input; blank input is ignored.
    pub fn set_format(&mut self, raw: &str) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            self.format = trimmed.to_lowercase();
        }
    }
}

/// Reads and writes [`Settings`] at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults on any I/O or parse failure.
    pub fn load(&self) -> Settings {
        if !self.path.exists() {
            debug!("No settings file at {:?}, using defaults", self.path);
            return Settings::default();
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read settings {:?}: {}", self.path, e);
                return Settings::default();
            }
        };

        match serde_json::from_str::<Settings>(&content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring malformed settings {:?}: {}", self.path, e);
                Settings::default()
            }
        }
    }

    /// Overwrite the settings file with `settings`.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write settings to {:?}", self.path))?;
        debug!("Saved settings to {:?}", self.path);
        Ok(())
    }
}
