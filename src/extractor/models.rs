//! Data structures for probe results

use serde::{Deserialize, Deserializer, Serialize};

/// One encoded rendition offered for a video
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    pub format_id: String,
    #[serde(default)]
    pub ext: String,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub tbr: Option<f64>, // Total bitrate (kbps)
    #[serde(default)]
    pub abr: Option<f64>, // Audio bitrate (kbps)
    #[serde(default, deserialize_with = "codec")]
    pub vcodec: Option<String>,
    #[serde(default, deserialize_with = "codec")]
    pub acodec: Option<String>,
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub filesize_approx: Option<u64>,
    #[serde(default)]
    pub format_note: Option<String>,
}

/// yt-dlp reports an absent codec as the literal string "none".
fn codec<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|c| !c.is_empty() && c != "none"))
}

impl StreamDescriptor {
    pub fn has_video(&self) -> bool {
        self.vcodec.is_some()
    }

    pub fn has_audio(&self) -> bool {
        self.acodec.is_some()
    }

    pub fn is_audio_only(&self) -> bool {
        self.resolution.as_deref() == Some("audio only") || (!self.has_video() && self.has_audio())
    }

    /// Exact size when known, otherwise the extractor's estimate
    pub fn size_bytes(&self) -> Option<u64> {
        self.filesize
            .filter(|s| *s > 0)
            .or(self.filesize_approx.filter(|s| *s > 0))
    }

    /// Resolution column for the stream picker
    pub fn resolution_label(&self) -> String {
        if self.is_audio_only() {
            match self.abr {
                Some(abr) => format!("Audio ({:.0}kbps)", abr),
                None => "Audio (N/A)".to_string(),
            }
        } else if let Some(height) = self.height {
            format!("{}p", height)
        } else {
            self.resolution.clone().unwrap_or_else(|| "N/A".to_string())
        }
    }

    pub fn size_label(&self) -> String {
        match self.size_bytes() {
            Some(bytes) => format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0),
            None => "N/A".to_string(),
        }
    }

    pub fn bitrate_label(&self) -> String {
        match self.tbr {
            Some(tbr) if tbr > 0.0 => format!("{:.0} kbps", tbr),
            _ => "N/A".to_string(),
        }
    }
}

/// What a probe found at a URL
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeResult {
    pub title: Option<String>,
    pub is_playlist: bool,
    /// Number of playlist entries (1 for a single video)
    pub entry_count: usize,
    /// Streams for selection; for playlists, those of the first entry
    pub streams: Vec<StreamDescriptor>,
}

/// Subset of yt-dlp's `--dump-single-json` document that the probe reads
#[derive(Debug, Deserialize)]
pub(crate) struct RawInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub formats: Option<Vec<StreamDescriptor>>,
    #[serde(default)]
    pub entries: Option<Vec<Option<RawInfo>>>,
}

impl From<RawInfo> for ProbeResult {
    fn from(info: RawInfo) -> Self {
        match info.entries {
            Some(entries) => {
                let entry_count = entries.len();
                let streams = entries
                    .into_iter()
                    .flatten()
                    .next()
                    .and_then(|first| first.formats)
                    .unwrap_or_default();
                ProbeResult {
                    title: info.title,
                    is_playlist: true,
                    entry_count,
                    streams,
                }
            }
            None => ProbeResult {
                title: info.title,
                is_playlist: false,
                entry_count: 1,
                streams: info.formats.unwrap_or_default(),
            },
        }
    }
}
