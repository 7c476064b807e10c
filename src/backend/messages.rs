use crate::backend::picker::SelectionPrompt;
use crate::downloader::{DownloadMode, DownloadOutcome, PlaylistSlice};
use crate::utils::error::TubefetchError;

/// What the download form held when the user pressed Download
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DownloadForm {
    pub url: String,
    pub mode: DownloadMode,
    /// Playlist options, ignored for single videos
    pub download_all: bool,
    pub reverse: bool,
    pub start: String,
    pub end: String,
}

impl DownloadForm {
    pub fn playlist_choice(&self) -> PlaylistChoice {
        PlaylistChoice {
            download_all: self.download_all,
            reverse: self.reverse,
            start: self.start.clone(),
            end: self.end.clone(),
        }
    }
}

/// Playlist options as the user left them, still unparsed
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistChoice {
    pub download_all: bool,
    pub reverse: bool,
    pub start: String,
    pub end: String,
}

impl PlaylistChoice {
    pub fn to_slice(&self) -> Result<PlaylistSlice, TubefetchError> {
        if self.download_all {
            Ok(PlaylistSlice::all(self.reverse))
        } else {
            PlaylistSlice::from_fields(&self.start, &self.end, self.reverse)
        }
    }
}

/// Commands sent from GUI to Backend
#[derive(Debug, Clone)]
pub enum BackendCommand {
    Download(DownloadForm),
    // System
    Shutdown,
}

/// Events sent from Backend to GUI
#[derive(Debug, Clone)]
pub enum BackendEvent {
    // Probing
    ProbeStarted,
    PlaylistDetected { entries: usize },

    // Selection
    SelectionRequested(SelectionPrompt),
    SelectionCancelled,

    // Download life-cycle
    DownloadStarted,
    DownloadProgress(f32),
    DownloadFinished(DownloadOutcome),

    // Validation, probe and setup failures
    Error(String),
}
