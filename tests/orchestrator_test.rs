//! Download orchestration against a fake extractor.

mod common;

use common::{history_lines, FakeExtractor};
use std::sync::Arc;
use tempfile::tempdir;
use tokio::sync::mpsc;
use tubefetch::downloader::{
    DownloadMode, DownloadOrchestrator, DownloadOutcome, DownloadRequest, DownloadUpdate,
    PlaylistSlice, ProgressEvent,
};
use tubefetch::utils::{HistoryLog, TubefetchError};

const URL: &str = "https://www.youtube.com/watch?v=abc123";

async fn drain(mut rx: mpsc::Receiver<DownloadUpdate>) -> Vec<DownloadUpdate> {
    let mut updates = Vec::new();
    while let Some(update) = rx.recv().await {
        updates.push(update);
    }
    updates
}

fn estimate_only(downloaded: u64, estimate: u64) -> ProgressEvent {
    ProgressEvent {
        status: "downloading".to_string(),
        downloaded_bytes: downloaded,
        total_bytes: None,
        total_bytes_estimate: Some(estimate),
    }
}

#[tokio::test]
async fn successful_download_reports_progress_then_resets() {
    let dir = tempdir().expect("temp dir");
    let history_path = dir.path().join("download_history.log");
    let extractor = Arc::new(FakeExtractor::default().progress(vec![
        ProgressEvent::downloading(50, Some(200)),
        estimate_only(300, 400),
        // No total at all: no update
        ProgressEvent::downloading(10, None),
    ]));
    let orchestrator = DownloadOrchestrator::new(extractor.clone(), HistoryLog::new(&history_path));

    let request = DownloadRequest::new(URL, DownloadMode::VideoAudio, "22", dir.path(), "mp4");
    let (tx, rx) = mpsc::channel(16);
    let handle = orchestrator.start(request, tx).expect("valid request");

    let outcome = handle.await.expect("task");
    let updates = drain(rx).await;

    assert_eq!(outcome, DownloadOutcome::Success { playlist: false });
    assert_eq!(
        updates,
        vec![
            DownloadUpdate::Progress(25.0),
            DownloadUpdate::Progress(75.0),
            DownloadUpdate::Finished(DownloadOutcome::Success { playlist: false }),
            DownloadUpdate::Progress(0.0),
        ]
    );

    let lines = history_lines(&history_path);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with(&format!(" | video+audio:22 | {} | Success", URL)));

    let retrievals = extractor.retrievals();
    assert_eq!(retrievals.len(), 1);
    assert_eq!(retrievals[0].1.format, "22+bestaudio[ext=m4a]/best");
    assert_eq!(retrievals[0].1.merge_output_format.as_deref(), Some("mp4"));
    assert!(retrievals[0].1.no_playlist);
}

#[tokio::test]
async fn non_zero_exit_is_a_failure() {
    let dir = tempdir().expect("temp dir");
    let history_path = dir.path().join("download_history.log");
    let extractor = Arc::new(FakeExtractor::default().exit_code(1));
    let orchestrator = DownloadOrchestrator::new(extractor, HistoryLog::new(&history_path));

    let request = DownloadRequest::new(URL, DownloadMode::AudioOnly, "140", dir.path(), "mp4");
    let (tx, rx) = mpsc::channel(16);
    let outcome = orchestrator.start(request, tx).unwrap().await.unwrap();
    let updates = drain(rx).await;

    assert!(!outcome.is_success());
    assert!(matches!(
        updates.as_slice(),
        [DownloadUpdate::Finished(DownloadOutcome::Failed(_)), DownloadUpdate::Progress(p)] if *p == 0.0
    ));

    let lines = history_lines(&history_path);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("audio-only:140"));
    assert!(lines[0].ends_with("Failed: yt-dlp exited with code 1"));
}

#[tokio::test]
async fn retrieval_error_is_recorded() {
    let dir = tempdir().expect("temp dir");
    let history_path = dir.path().join("download_history.log");
    let extractor = Arc::new(FakeExtractor::default().failing_retrieve("yt-dlp not found"));
    let orchestrator = DownloadOrchestrator::new(extractor, HistoryLog::new(&history_path));

    let request = DownloadRequest::new(URL, DownloadMode::VideoOnly, "137", dir.path(), "mp4");
    let (tx, rx) = mpsc::channel(16);
    let outcome = orchestrator.start(request, tx).unwrap().await.unwrap();
    let updates = drain(rx).await;

    assert_eq!(outcome, DownloadOutcome::Failed("yt-dlp not found".to_string()));
    assert_eq!(updates.last(), Some(&DownloadUpdate::Progress(0.0)));
    assert_eq!(history_lines(&history_path).len(), 1);
}

#[tokio::test]
async fn playlist_success_is_labelled() {
    let dir = tempdir().expect("temp dir");
    let history_path = dir.path().join("download_history.log");
    let extractor = Arc::new(FakeExtractor::default());
    let orchestrator = DownloadOrchestrator::new(extractor.clone(), HistoryLog::new(&history_path));

    let request = DownloadRequest::new(URL, DownloadMode::VideoOnly, "137", dir.path(), "mp4")
        .with_playlist(PlaylistSlice {
            start: Some(2),
            end: Some(5),
            reverse: true,
        });
    let (tx, rx) = mpsc::channel(16);
    let outcome = orchestrator.start(request, tx).unwrap().await.unwrap();
    drain(rx).await;

    assert_eq!(outcome, DownloadOutcome::Success { playlist: true });
    assert!(history_lines(&history_path)[0].ends_with("Success (Playlist)"));

    let (_, options) = &extractor.retrievals()[0];
    assert_eq!(options.playlist_start, Some(2));
    assert_eq!(options.playlist_end, Some(5));
    assert!(options.playlist_reverse);
    assert!(options
        .output_template
        .ends_with("%(playlist_index)s-%(title)s.%(ext)s"));
}

#[tokio::test]
async fn invalid_slice_is_rejected_before_retrieval() {
    let dir = tempdir().expect("temp dir");
    let history_path = dir.path().join("download_history.log");
    let extractor = Arc::new(FakeExtractor::default());
    let orchestrator = DownloadOrchestrator::new(extractor.clone(), HistoryLog::new(&history_path));

    let request = DownloadRequest::new(URL, DownloadMode::VideoOnly, "137", dir.path(), "mp4")
        .with_playlist(PlaylistSlice {
            start: Some(3),
            end: Some(2),
            reverse: false,
        });
    let (tx, _rx) = mpsc::channel(16);
    let err = orchestrator.start(request, tx).unwrap_err();

    assert!(matches!(err, TubefetchError::InvalidPlaylistRange(_)));
    assert!(extractor.retrievals().is_empty());
    assert!(history_lines(&history_path).is_empty());
}

#[tokio::test]
async fn invalid_url_is_rejected_before_retrieval() {
    let dir = tempdir().expect("temp dir");
    let extractor = Arc::new(FakeExtractor::default());
    let orchestrator = DownloadOrchestrator::new(
        extractor.clone(),
        HistoryLog::new(dir.path().join("download_history.log")),
    );

    let request = DownloadRequest::new(
        "https://example.com/video",
        DownloadMode::VideoOnly,
        "137",
        dir.path(),
        "mp4",
    );
    let (tx, _rx) = mpsc::channel(16);

    assert!(matches!(
        orchestrator.start(request, tx),
        Err(TubefetchError::InvalidUrl(_))
    ));
    assert!(extractor.retrievals().is_empty());
}
