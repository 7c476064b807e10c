//! Translate a download request into extractor options

use crate::downloader::filter::DownloadMode;
use crate::downloader::request::DownloadRequest;
use crate::extractor::options::RetrievalOptions;

const AUDIO_CODEC: &str = "mp3";
const BEST_AUDIO_FALLBACK: &str = "+bestaudio[ext=m4a]/best";

pub fn output_template(request: &DownloadRequest) -> std::path::PathBuf {
    let name = if request.is_playlist {
        "%(playlist_index)s-%(title)s.%(ext)s"
    } else {
        "%(title)s.%(ext)s"
    };
    request.output_dir.join(name)
}

pub fn build_retrieval_options(request: &DownloadRequest) -> RetrievalOptions {
    let (format, merge_output_format, extract_audio_codec) = match request.mode {
        DownloadMode::VideoAudio => (
            format!("{}{}", request.format_id, BEST_AUDIO_FALLBACK),
            Some(request.container.clone()),
            None,
        ),
        DownloadMode::VideoOnly => (request.format_id.clone(), None, None),
        DownloadMode::AudioOnly => (
            request.format_id.clone(),
            None,
            Some(AUDIO_CODEC.to_string()),
        ),
    };

    let mut options = RetrievalOptions {
        output_template: output_template(request),
        format,
        merge_output_format,
        extract_audio_codec,
        no_playlist: !request.is_playlist,
        ignore_errors: true,
        ..Default::default()
    };

    if request.is_playlist {
        if let Some(slice) = &request.playlist {
            options.playlist_start = slice.start;
            options.playlist_end = slice.end;
            options.playlist_reverse = slice.reverse;
        }
    }

    options
}
