//! Progress tracking for downloads

/// Progress callback payload reported by the extractor while retrieving
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    /// "downloading", "finished", "error", ...
    pub status: String,
    pub downloaded_bytes: u64,
    pub total_bytes: Option<u64>,
    pub total_bytes_estimate: Option<u64>,
}

impl ProgressEvent {
    pub fn downloading(downloaded_bytes: u64, total_bytes: Option<u64>) -> Self {
        Self {
            status: "downloading".to_string(),
            downloaded_bytes,
            total_bytes,
            total_bytes_estimate: None,
        }
    }

    /// Exact total when known, otherwise the estimate
    pub fn effective_total(&self) -> Option<u64> {
        self.total_bytes
            .filter(|t| *t > 0)
            .or(self.total_bytes_estimate.filter(|t| *t > 0))
    }

    /// Percentage in `0.0..=100.0`.
    ///
    /// `None` unless the event is a "downloading" tick with a usable total.
    pub fn percentage(&self) -> Option<f32> {
        if self.status != "downloading" {
            return None;
        }
        let total = self.effective_total()?;
        let pct = (self.downloaded_bytes as f64 / total as f64) * 100.0;
        Some(pct.clamp(0.0, 100.0) as f32)
    }
}

/// Outcome of a finished retrieval
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadOutcome {
    Success { playlist: bool },
    Failed(String),
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DownloadOutcome::Success { .. })
    }

    /// Outcome column of the history log
    pub fn history_text(&self) -> String {
        match self {
            DownloadOutcome::Success { playlist: false } => "Success".to_string(),
            DownloadOutcome::Success { playlist: true } => "Success (Playlist)".to_string(),
            DownloadOutcome::Failed(message) => format!("Failed: {}", message),
        }
    }
}

/// Updates relayed from a running download to its owner
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadUpdate {
    Progress(f32),
    Finished(DownloadOutcome),
}
