//! Utility modules for error handling, configuration and persistence

pub mod bundle_paths;
pub mod config;
pub mod error;
pub mod history;

// Re-export for convenience
pub use bundle_paths::{get_app_support_dir, get_downloads_dir, AppPaths};
pub use config::{Settings, SettingsStore};
pub use error::TubefetchError;
pub use history::{HistoryEntry, HistoryLog};
