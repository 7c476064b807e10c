use chrono::{Local, NaiveDateTime};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Shown by the history panel when there is nothing to replay.
pub const EMPTY_HISTORY_MESSAGE: &str = "No download history available.";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One line of the download history
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub timestamp: NaiveDateTime,
    /// `<mode>:<format id>`
    pub kind: String,
    pub url: String,
    pub outcome: String,
}

impl HistoryEntry {
    pub fn now(kind: impl Into<String>, url: impl Into<String>, outcome: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now().naive_local(),
            kind: kind.into(),
            url: url.into(),
            outcome: outcome.into(),
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.kind,
            self.url,
            self.outcome
        )
    }
}

/// Append-only, pipe-delimited text log of download attempts.
///
/// The file is opened and closed on every write and each line goes out in a
/// single `write_all`, so concurrent downloads can share one log.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    file_path: PathBuf,
}

impl HistoryLog {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Append an entry. Failures are logged and otherwise ignored.
    pub async fn append(&self, entry: &HistoryEntry) {
        if let Err(e) = self.try_append(entry).await {
            warn!("Failed to write history entry to {:?}: {}", self.file_path, e);
        }
    }

    async fn try_append(&self, entry: &HistoryEntry) -> std::io::Result<()> {
        if let Some(parent) = self.file_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)
            .await?;
        let line = format!("{}\n", entry);
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        debug!("History: {}", line.trim_end());
        Ok(())
    }

    /// Raw log content, or [`EMPTY_HISTORY_MESSAGE`] when unreadable.
    pub async fn read_all(&self) -> String {
        match tokio::fs::read_to_string(&self.file_path).await {
            Ok(content) if !content.is_empty() => content,
            Ok(_) => EMPTY_HISTORY_MESSAGE.to_string(),
            Err(e) => {
                debug!("History not readable at {:?}: {}", self.file_path, e);
                EMPTY_HISTORY_MESSAGE.to_string()
            }
        }
    }
}
