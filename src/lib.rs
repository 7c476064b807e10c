//! Tubefetch library

pub mod backend;
pub mod downloader;
pub mod extractor;
pub mod gui;
pub mod server;
pub mod utils;

// Re-export main types for easier use
pub use downloader::{DownloadMode, DownloadOrchestrator, DownloadRequest, QualityPreference};
pub use extractor::{Extractor, YtDlpExtractor};
pub use gui::{Message, TubefetchApp, View};
pub use server::IntegrationServer;
pub use utils::{Settings, SettingsStore, TubefetchError};
