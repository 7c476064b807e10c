//! Option set handed to the extractor for one retrieval

use std::path::PathBuf;

/// Marks our progress lines in yt-dlp's stdout.
pub const PROGRESS_PREFIX: &str = "TF_PROGRESS|";

/// Template passed through `--progress-template`. The leading `download:`
/// selects the output type and is not printed; lines start at the prefix.
pub const PROGRESS_TEMPLATE: &str = "download:TF_PROGRESS|%(progress.status)s|%(progress.downloaded_bytes)s|%(progress.total_bytes)s|%(progress.total_bytes_estimate)s";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrievalOptions {
    /// Output path template, e.g. `/home/me/Downloads/%(title)s.%(ext)s`
    pub output_template: PathBuf,
    /// Format selector, e.g. `137+bestaudio[ext=m4a]/best`
    pub format: String,
    /// Container to merge separate video and audio streams into
    pub merge_output_format: Option<String>,
    /// Convert the result to this audio codec after download
    pub extract_audio_codec: Option<String>,
    pub no_playlist: bool,
    pub playlist_start: Option<usize>,
    pub playlist_end: Option<usize>,
    pub playlist_reverse: bool,
    /// Keep going when single playlist entries fail
    pub ignore_errors: bool,
}

impl RetrievalOptions {
    /// Command-line arguments for yt-dlp, excluding the URL.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            self.output_template.to_string_lossy().into_owned(),
            "-f".to_string(),
            self.format.clone(),
        ];

        if let Some(container) = &self.merge_output_format {
            args.push("--merge-output-format".to_string());
            args.push(container.clone());
        }

        if let Some(codec) = &self.extract_audio_codec {
            args.push("-x".to_string());
            args.push("--audio-format".to_string());
            args.push(codec.clone());
        }

        if self.no_playlist {
            args.push("--no-playlist".to_string());
        } else {
            args.push("--yes-playlist".to_string());
            if let Some(start) = self.playlist_start {
                args.push("--playlist-start".to_string());
                args.push(start.to_string());
            }
            if let Some(end) = self.playlist_end {
                args.push("--playlist-end".to_string());
                args.push(end.to_string());
            }
            if self.playlist_reverse {
                args.push("--playlist-reverse".to_string());
            }
        }

        if self.ignore_errors {
            args.push("--ignore-errors".to_string());
        }

        args.extend([
            "--newline".to_string(),
            "--no-warnings".to_string(),
            "--progress-template".to_string(),
            PROGRESS_TEMPLATE.to_string(),
        ]);

        args
    }
}
