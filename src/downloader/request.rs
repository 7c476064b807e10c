//! Download requests and their validation
//!
//! Everything here runs before the network is touched. A request that fails
//! validation never reaches the extractor.

use crate::downloader::filter::DownloadMode;
use crate::utils::error::TubefetchError;
use std::path::PathBuf;
use url::Url;

const SUPPORTED_HOSTS: [&str; 2] = ["youtube.com", "youtu.be"];

/// 1-based, inclusive bounds on playlist entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaylistSlice {
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub reverse: bool,
}

impl PlaylistSlice {
    /// Every entry, optionally in reverse order
    pub fn all(reverse: bool) -> Self {
        Self {
            start: None,
            end: None,
            reverse,
        }
    }

    pub fn validate(&self) -> Result<(), TubefetchError> {
        if self.start == Some(0) {
            return Err(TubefetchError::InvalidPlaylistRange(
                "start must be 1 or greater".to_string(),
            ));
        }
        if self.end == Some(0) {
            return Err(TubefetchError::InvalidPlaylistRange(
                "end must be 1 or greater".to_string(),
            ));
        }
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if end < start {
                return Err(TubefetchError::InvalidPlaylistRange(format!(
                    "end ({}) is before start ({})",
                    end, start
                )));
            }
        }
        Ok(())
    }

    /// Parse the text fields of the playlist form. Blank means unbounded.
    pub fn from_fields(start: &str, end: &str, reverse: bool) -> Result<Self, TubefetchError> {
        let slice = Self {
            start: parse_bound("start", start)?,
            end: parse_bound("end", end)?,
            reverse,
        };
        slice.validate()?;
        Ok(slice)
    }
}

fn parse_bound(name: &str, raw: &str) -> Result<Option<usize>, TubefetchError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<usize>().map(Some).map_err(|_| {
        TubefetchError::InvalidPlaylistRange(format!("{} must be a whole number, got '{}'", name, raw))
    })
}

/// One download attempt. Built per attempt, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadRequest {
    pub url: String,
    pub mode: DownloadMode,
    pub format_id: String,
    pub is_playlist: bool,
    /// Applies only when `is_playlist` is set
    pub playlist: Option<PlaylistSlice>,
    pub output_dir: PathBuf,
    /// Merge container for video+audio downloads
    pub container: String,
}

impl DownloadRequest {
    pub fn new(
        url: impl Into<String>,
        mode: DownloadMode,
        format_id: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        container: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            mode,
            format_id: format_id.into(),
            is_playlist: false,
            playlist: None,
            output_dir: output_dir.into(),
            container: container.into(),
        }
    }

    pub fn with_playlist(mut self, slice: PlaylistSlice) -> Self {
        self.is_playlist = true;
        self.playlist = Some(slice);
        self
    }

    pub fn validate(&self) -> Result<(), TubefetchError> {
        validate_url(&self.url)?;
        if self.format_id.trim().is_empty() {
            return Err(TubefetchError::MissingField("format_id".to_string()));
        }
        if self.is_playlist {
            if let Some(slice) = &self.playlist {
                slice.validate()?;
            }
        }
        Ok(())
    }

    /// Label recorded in the history log, e.g. `video+audio:137`
    pub fn history_kind(&self) -> String {
        format!("{}:{}", self.mode.as_str(), self.format_id)
    }
}

/// Accept non-empty http(s) URLs on a supported host.
pub fn validate_url(raw: &str) -> Result<Url, TubefetchError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TubefetchError::InvalidUrl("URL is empty".to_string()));
    }

    let url = Url::parse(raw).map_err(|e| TubefetchError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TubefetchError::InvalidUrl(format!(
            "unsupported scheme '{}'",
            url.scheme()
        )));
    }

    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let supported = SUPPORTED_HOSTS
        .iter()
        .any(|h| host == *h || host.ends_with(&format!(".{}", h)));
    if !supported {
        return Err(TubefetchError::InvalidUrl(format!(
            "unsupported host '{}'",
            host
        )));
    }

    Ok(url)
}

/// Cheap check used for clipboard prefill
pub fn looks_supported(raw: &str) -> bool {
    let raw = raw.trim();
    SUPPORTED_HOSTS.iter().any(|h| raw.contains(h))
}

pub fn is_playlist_url(raw: &str) -> bool {
    raw.contains("playlist") && playlist_id(raw).is_some()
}

fn playlist_id(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    url.query_pairs()
        .find(|(k, _)| k == "list")
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

/// Rewrite playlist page URLs to the canonical `playlist?list=` form.
/// Anything else is returned trimmed but otherwise untouched.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.contains("playlist") {
        if let Some(id) = playlist_id(trimmed) {
            return format!("https://youtube.com/playlist?list={}", id);
        }
    }
    trimmed.to_string()
}
