//! Application path resolution
//!
//! When launched from a desktop shell the current working directory is often
//! "/" (or the install directory), so relative paths resolve to the wrong
//! place. Everything here is resolved from the user's home and data
//! directories instead:
//! - Data directory: `<data dir>/Tubefetch/` (settings and history)
//! - Downloads: `<home>/Downloads/` (never relative paths like ./downloads)

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const APP_DIR_NAME: &str = "Tubefetch";
const SETTINGS_FILE_NAME: &str = "settings.json";
const HISTORY_FILE_NAME: &str = "download_history.log";

/// Get the data directory for Tubefetch.
///
/// Creates the directory if it doesn't exist.
pub fn get_app_support_dir() -> PathBuf {
    let dir = dirs::data_dir()
        .map(|data| data.join(APP_DIR_NAME))
        .or_else(|| dirs::home_dir().map(|home| home.join(".tubefetch")))
        .unwrap_or_else(|| std::env::temp_dir().join(APP_DIR_NAME));

    if let Err(e) = std::fs::create_dir_all(&dir) {
        warn!("Failed to create data directory {:?}: {}", dir, e);
    }

    debug!("Data directory: {:?}", dir);
    dir
}

/// Get the downloads directory: `<home>/Downloads`.
pub fn get_downloads_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join("Downloads"))
        .unwrap_or_else(|| {
            warn!("Could not determine home directory, using temp dir for downloads");
            std::env::temp_dir()
        })
}

/// Files the application persists, rooted at one directory.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub base_dir: PathBuf,
}

impl AppPaths {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve the default per-user location, or `override_dir` when given.
    pub fn resolve(override_dir: Option<&Path>) -> Self {
        match override_dir {
            Some(dir) => {
                if let Err(e) = std::fs::create_dir_all(dir) {
                    warn!("Failed to create data directory {:?}: {}", dir, e);
                }
                Self::new(dir)
            }
            None => Self::new(get_app_support_dir()),
        }
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join(SETTINGS_FILE_NAME)
    }

    pub fn history_file(&self) -> PathBuf {
        self.base_dir.join(HISTORY_FILE_NAME)
    }
}
