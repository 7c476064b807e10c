//! Format filtering and ranking
//!
//! One contract serves both the interactive picker and the integration
//! endpoint: keep the streams that fit a download mode, best first.

use crate::extractor::models::StreamDescriptor;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// What the user wants out of a video
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DownloadMode {
    #[default]
    #[serde(rename = "video-audio", alias = "video+audio")]
    VideoAudio,
    #[serde(rename = "video-only")]
    VideoOnly,
    #[serde(rename = "audio-only")]
    AudioOnly,
}

impl DownloadMode {
    pub fn all() -> [DownloadMode; 3] {
        [
            DownloadMode::VideoAudio,
            DownloadMode::VideoOnly,
            DownloadMode::AudioOnly,
        ]
    }

    /// Name used in the history log
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadMode::VideoAudio => "video+audio",
            DownloadMode::VideoOnly => "video-only",
            DownloadMode::AudioOnly => "audio-only",
        }
    }

    /// Name used by the browser extension
    pub fn wire_name(&self) -> &'static str {
        match self {
            DownloadMode::VideoAudio => "video-audio",
            DownloadMode::VideoOnly => "video-only",
            DownloadMode::AudioOnly => "audio-only",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DownloadMode::VideoAudio => "Video + Audio",
            DownloadMode::VideoOnly => "Video Only",
            DownloadMode::AudioOnly => "Audio Only",
        }
    }

    fn allowed_containers(&self) -> &'static [&'static str] {
        match self {
            DownloadMode::VideoAudio => &["mp4", "mkv", "webm"],
            DownloadMode::VideoOnly => &["mp4", "webm"],
            DownloadMode::AudioOnly => &["m4a", "mp3", "opus", "webm"],
        }
    }

    fn accepts(&self, stream: &StreamDescriptor) -> bool {
        let codecs_match = match self {
            DownloadMode::VideoAudio => stream.has_video() && stream.has_audio(),
            DownloadMode::VideoOnly => stream.has_video() && !stream.has_audio(),
            DownloadMode::AudioOnly => stream.has_audio() && !stream.has_video(),
        };
        codecs_match && self.allowed_containers().contains(&stream.ext.as_str())
    }

    /// Descending rank; missing numbers count as zero.
    fn rank(&self, a: &StreamDescriptor, b: &StreamDescriptor) -> Ordering {
        let height = |s: &StreamDescriptor| s.height.unwrap_or(0);
        let tbr = |s: &StreamDescriptor| s.tbr.unwrap_or(0.0);
        let abr = |s: &StreamDescriptor| s.abr.unwrap_or(0.0);

        match self {
            DownloadMode::VideoAudio => height(b)
                .cmp(&height(a))
                .then_with(|| tbr(b).total_cmp(&tbr(a))),
            DownloadMode::VideoOnly => height(b).cmp(&height(a)),
            DownloadMode::AudioOnly => abr(b).total_cmp(&abr(a)),
        }
    }
}

impl fmt::Display for DownloadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which of the ranked streams the endpoint picks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreference {
    #[default]
    Highest,
    Lowest,
    #[serde(other)]
    Medium,
}

/// Keep the streams that fit `mode`, sorted best first.
///
/// The sort is stable, so equally ranked streams keep the extractor's order.
pub fn filter_formats(streams: &[StreamDescriptor], mode: DownloadMode) -> Vec<StreamDescriptor> {
    let mut kept: Vec<StreamDescriptor> = streams
        .iter()
        .filter(|s| mode.accepts(s))
        .cloned()
        .collect();
    kept.sort_by(|a, b| mode.rank(a, b));
    kept
}

/// Apply the quality policy to an already ranked list.
pub fn select_by_quality(
    ranked: &[StreamDescriptor],
    preference: QualityPreference,
) -> Option<&StreamDescriptor> {
    if ranked.is_empty() {
        return None;
    }
    let index = match preference {
        QualityPreference::Highest => 0,
        QualityPreference::Lowest => ranked.len() - 1,
        QualityPreference::Medium => ranked.len() / 2,
    };
    ranked.get(index)
}
