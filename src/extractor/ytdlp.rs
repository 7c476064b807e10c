//! yt-dlp wrapper for probing and retrieval
//!
//! yt-dlp runs as a child process. Probing reads its single-JSON dump;
//! retrieval streams stdout line by line and turns progress-template lines
//! into [`ProgressEvent`]s.

use crate::downloader::progress::ProgressEvent;
use crate::extractor::models::{ProbeResult, RawInfo};
use crate::extractor::options::{RetrievalOptions, PROGRESS_PREFIX};
use crate::extractor::traits::Extractor;
use crate::utils::error::TubefetchError;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command as AsyncCommand;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Extractor backed by the yt-dlp binary
pub struct YtDlpExtractor {
    ytdlp_path: Option<PathBuf>,
}

impl YtDlpExtractor {
    /// Locate yt-dlp. A missing binary is reported on first use, not here.
    pub fn new() -> Self {
        let ytdlp_path = find_ytdlp();
        match &ytdlp_path {
            Some(path) => info!("Found yt-dlp at: {}", path.display()),
            None => warn!("yt-dlp not found; probing and downloads will fail until it is installed"),
        }
        Self { ytdlp_path }
    }

    /// Use a specific yt-dlp binary
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            ytdlp_path: Some(path.into()),
        }
    }

    /// Get the path to yt-dlp being used
    pub fn ytdlp_path(&self) -> Option<&Path> {
        self.ytdlp_path.as_deref()
    }

    fn binary(&self) -> Result<&Path> {
        self.ytdlp_path
            .as_deref()
            .ok_or_else(|| TubefetchError::YtDlpNotFound.into())
    }
}

impl Default for YtDlpExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    /// Uses: yt-dlp --dump-single-json --no-warnings
    async fn probe(&self, url: &str) -> Result<ProbeResult> {
        debug!("Probing streams for URL: {}", url);

        let output = AsyncCommand::new(self.binary()?)
            .arg("--dump-single-json")
            .arg("--no-warnings")
            .arg(url)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(TubefetchError::from)?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("yt-dlp probe failed: {}", error_msg);
            return Err(TubefetchError::ExtractionError(error_msg).into());
        }

        let info: RawInfo =
            serde_json::from_slice(&output.stdout).map_err(TubefetchError::from)?;
        let probe = ProbeResult::from(info);
        debug!(
            "Probe found {} streams (playlist: {}, entries: {})",
            probe.streams.len(),
            probe.is_playlist,
            probe.entry_count
        );
        Ok(probe)
    }

    async fn retrieve(
        &self,
        url: &str,
        options: &RetrievalOptions,
        progress: mpsc::Sender<ProgressEvent>,
    ) -> Result<i32> {
        let args = options.to_args();
        debug!("Running yt-dlp {:?} {}", args, url);

        let mut child = AsyncCommand::new(self.binary()?)
            .args(&args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(TubefetchError::from)?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("Failed to capture yt-dlp stdout"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| anyhow!("Failed to capture yt-dlp stderr"))?;

        // Drain stderr concurrently so a chatty process can't fill the pipe
        let stderr_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf).await;
            String::from_utf8_lossy(&buf).into_owned()
        });

        let mut lines = BufReader::new(stdout).split(b'\n');
        while let Some(segment) = lines.next_segment().await? {
            let line = String::from_utf8_lossy(&segment);
            match parse_progress_line(&line) {
                Some(event) => {
                    // A dropped receiver only means nobody is watching
                    let _ = progress.send(event).await;
                }
                None => debug!("yt-dlp: {}", line.trim_end()),
            }
        }

        let status = child.wait().await?;
        let stderr_text = stderr_task.await.unwrap_or_default();
        let code = status.code().unwrap_or(-1);

        if code != 0 {
            error!(
                "yt-dlp exited with code {}: {}",
                code,
                last_error_line(&stderr_text).unwrap_or("no error output")
            );
        }

        Ok(code)
    }
}

/// Parse a line produced by the progress template:
/// `TF_PROGRESS|<status>|<downloaded>|<total>|<estimate>`
pub fn parse_progress_line(line: &str) -> Option<ProgressEvent> {
    let rest = line.trim().strip_prefix(PROGRESS_PREFIX)?;
    let parts: Vec<&str> = rest.split('|').collect();
    if parts.len() != 4 {
        return None;
    }

    Some(ProgressEvent {
        status: parts[0].trim().to_string(),
        downloaded_bytes: parse_bytes(parts[1]).unwrap_or(0),
        total_bytes: parse_bytes(parts[2]),
        total_bytes_estimate: parse_bytes(parts[3]),
    })
}

/// yt-dlp prints "NA" for unknown fields and floats for estimates
fn parse_bytes(raw: &str) -> Option<u64> {
    let value = raw.trim().parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value as u64)
    } else {
        None
    }
}

fn last_error_line(stderr: &str) -> Option<&str> {
    stderr
        .lines()
        .rev()
        .find(|l| l.contains("ERROR"))
        .or_else(|| stderr.lines().rev().find(|l| !l.trim().is_empty()))
}

// ============================================================
// yt-dlp Detection Functions
// ============================================================

/// Find yt-dlp binary with priority:
/// 1. Next to the executable (bundled builds and development)
/// 2. System PATH
/// 3. Common installation paths
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Some(bundled) = find_bundled_ytdlp() {
        info!("Using bundled yt-dlp: {:?}", bundled);
        return Some(bundled);
    }

    if let Some(system) = find_in_path() {
        info!("Using system yt-dlp: {:?}", system);
        return Some(system);
    }

    if let Some(common) = find_in_common_paths() {
        info!("Using yt-dlp from common path: {:?}", common);
        return Some(common);
    }

    None
}

fn binary_name() -> &'static str {
    if cfg!(windows) {
        "yt-dlp.exe"
    } else {
        "yt-dlp"
    }
}

/// Find yt-dlp shipped alongside the executable
fn find_bundled_ytdlp() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let exe_dir = exe_path.parent()?;

    let candidates = [
        exe_dir.join(binary_name()),
        exe_dir.join("bin").join(binary_name()),
    ];

    candidates
        .into_iter()
        .find(|path| path.is_file() && is_executable(path))
}

fn find_in_path() -> Option<PathBuf> {
    which::which("yt-dlp").ok().filter(|path| path.exists())
}

fn find_in_common_paths() -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = [
        // macOS Homebrew (Apple Silicon)
        "/opt/homebrew/bin/yt-dlp",
        // macOS Homebrew (Intel) and manual installs
        "/usr/local/bin/yt-dlp",
        "/usr/bin/yt-dlp",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();

    if let Some(home) = dirs::home_dir() {
        // pip --user
        candidates.push(home.join(".local").join("bin").join("yt-dlp"));
    }

    candidates
        .into_iter()
        .find(|path| path.exists() && is_executable(path))
}

/// Check if a file is executable
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, just check if file exists
#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.exists()
}

// ============================================================
// Tests
// ============================================================
