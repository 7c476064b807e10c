//! Backend workflow: probe, filter, selection, validation, retrieval.

mod common;

use async_trait::async_trait;
use common::{audio, history_lines, muxed, FakeExtractor};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tubefetch::backend::{
    BackendActor, BackendCommand, BackendEvent, DownloadForm, PlaylistChoice, Selection,
    StreamPicker,
};
use tubefetch::downloader::{DownloadMode, DownloadOutcome, ProgressEvent};
use tubefetch::extractor::StreamDescriptor;
use tubefetch::utils::{HistoryLog, SettingsStore};

const URL: &str = "https://www.youtube.com/watch?v=abc123";

/// Picker that always answers the same way and counts how often it was asked
struct FixedPicker {
    choice: Option<Selection>,
    asked: AtomicUsize,
    playlist_entries: Mutex<Option<usize>>,
}

impl FixedPicker {
    fn new(choice: Option<&str>) -> Arc<Self> {
        Self::answering(choice.map(Selection::stream))
    }

    fn answering(choice: Option<Selection>) -> Arc<Self> {
        Arc::new(Self {
            choice,
            asked: AtomicUsize::new(0),
            playlist_entries: Mutex::new(None),
        })
    }
}

#[async_trait]
impl StreamPicker for FixedPicker {
    async fn pick(
        &self,
        _title: Option<&str>,
        _mode: DownloadMode,
        streams: &[StreamDescriptor],
        playlist_entries: Option<usize>,
    ) -> Option<Selection> {
        assert!(!streams.is_empty());
        self.asked.fetch_add(1, Ordering::SeqCst);
        *self.playlist_entries.lock().unwrap() = playlist_entries;
        self.choice.clone()
    }
}

struct Harness {
    commands: mpsc::Sender<BackendCommand>,
    events: mpsc::Receiver<BackendEvent>,
}

impl Harness {
    fn start(extractor: Arc<FakeExtractor>, picker: Arc<FixedPicker>, data_dir: &Path) -> Self {
        let (command_tx, command_rx) = mpsc::channel(8);
        let (event_tx, event_rx) = mpsc::channel(64);
        let actor = BackendActor::with_picker(
            command_rx,
            event_tx,
            extractor,
            SettingsStore::new(data_dir.join("settings.json")),
            HistoryLog::new(data_dir.join("download_history.log")),
            picker,
        );
        tokio::spawn(actor.run());
        Self {
            commands: command_tx,
            events: event_rx,
        }
    }

    async fn download(&self, form: DownloadForm) {
        self.commands
            .send(BackendCommand::Download(form))
            .await
            .expect("actor alive");
    }

    async fn next(&mut self) -> BackendEvent {
        timeout(Duration::from_secs(5), self.events.recv())
            .await
            .expect("event in time")
            .expect("channel open")
    }

    /// Collect events up to and including the first terminal one
    async fn until_done(&mut self) -> Vec<BackendEvent> {
        let mut seen = Vec::new();
        loop {
            let event = self.next().await;
            let done = matches!(
                event,
                BackendEvent::DownloadFinished(_)
                    | BackendEvent::SelectionCancelled
                    | BackendEvent::Error(_)
            );
            seen.push(event);
            if done {
                return seen;
            }
        }
    }
}

fn form(url: &str, mode: DownloadMode) -> DownloadForm {
    DownloadForm {
        url: url.to_string(),
        mode,
        download_all: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn download_runs_to_completion() {
    let dir = tempdir().unwrap();
    let extractor = Arc::new(
        FakeExtractor::with_streams(vec![muxed("18", 360, 500.0), muxed("22", 720, 1200.0)])
            .progress(vec![ProgressEvent::downloading(1, Some(2))]),
    );
    let picker = FixedPicker::new(Some("22"));
    let mut harness = Harness::start(extractor.clone(), picker.clone(), dir.path());

    harness.download(form(URL, DownloadMode::VideoAudio)).await;
    let events = harness.until_done().await;

    assert!(matches!(events.first(), Some(BackendEvent::ProbeStarted)));
    assert!(events
        .iter()
        .any(|e| matches!(e, BackendEvent::DownloadStarted)));
    assert!(events
        .iter()
        .any(|e| matches!(e, BackendEvent::DownloadProgress(p) if *p == 50.0)));
    assert!(matches!(
        events.last(),
        Some(BackendEvent::DownloadFinished(DownloadOutcome::Success { playlist: false }))
    ));
    // Indicator resets after the outcome
    assert!(matches!(harness.next().await, BackendEvent::DownloadProgress(p) if p == 0.0));

    assert_eq!(picker.asked.load(Ordering::SeqCst), 1);
    assert_eq!(extractor.retrievals()[0].1.format, "22+bestaudio[ext=m4a]/best");
    let lines = history_lines(&dir.path().join("download_history.log"));
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("video+audio:22"));
}

#[tokio::test]
async fn cancelled_selection_downloads_nothing() {
    let dir = tempdir().unwrap();
    let extractor = Arc::new(FakeExtractor::with_streams(vec![audio("140", 128.0)]));
    let mut harness = Harness::start(extractor.clone(), FixedPicker::new(None), dir.path());

    harness.download(form(URL, DownloadMode::AudioOnly)).await;
    let events = harness.until_done().await;

    assert!(matches!(events.last(), Some(BackendEvent::SelectionCancelled)));
    assert!(extractor.retrievals().is_empty());
    assert!(history_lines(&dir.path().join("download_history.log")).is_empty());
}

#[tokio::test]
async fn invalid_url_never_probes() {
    let dir = tempdir().unwrap();
    let extractor = Arc::new(FakeExtractor::default());
    let mut harness = Harness::start(extractor.clone(), FixedPicker::new(Some("x")), dir.path());

    harness
        .download(form("https://vimeo.com/123", DownloadMode::VideoAudio))
        .await;
    let events = harness.until_done().await;

    assert!(matches!(events.as_slice(), [BackendEvent::Error(_)]));
    assert_eq!(extractor.probe_count(), 0);
}

#[tokio::test]
async fn empty_filter_result_is_reported() {
    let dir = tempdir().unwrap();
    let extractor = Arc::new(FakeExtractor::with_streams(vec![audio("140", 128.0)]));
    let picker = FixedPicker::new(Some("140"));
    let mut harness = Harness::start(extractor, picker.clone(), dir.path());

    harness.download(form(URL, DownloadMode::VideoOnly)).await;
    let events = harness.until_done().await;

    match events.last() {
        Some(BackendEvent::Error(message)) => {
            assert_eq!(message, "No formats found for type: video-only")
        }
        other => panic!("unexpected event: {:?}", other),
    }
    assert_eq!(picker.asked.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn probe_results_are_cached_per_url() {
    let dir = tempdir().unwrap();
    let extractor = Arc::new(FakeExtractor::with_streams(vec![audio("140", 128.0)]));
    let mut harness = Harness::start(extractor.clone(), FixedPicker::new(None), dir.path());

    harness.download(form(URL, DownloadMode::AudioOnly)).await;
    let first = harness.until_done().await;
    harness.download(form(URL, DownloadMode::AudioOnly)).await;
    let second = harness.until_done().await;

    assert!(matches!(first.first(), Some(BackendEvent::ProbeStarted)));
    assert!(!second
        .iter()
        .any(|e| matches!(e, BackendEvent::ProbeStarted)));
    assert_eq!(extractor.probe_count(), 1);
}

#[tokio::test]
async fn playlist_range_is_validated_after_selection() {
    let dir = tempdir().unwrap();
    let extractor = Arc::new(FakeExtractor::playlist(12, vec![muxed("22", 720, 1200.0)]));
    let picker = FixedPicker::new(Some("22"));
    let mut harness = Harness::start(extractor.clone(), picker.clone(), dir.path());

    let mut bad = form("https://www.youtube.com/playlist?list=PL123", DownloadMode::VideoAudio);
    bad.download_all = false;
    bad.start = "two".to_string();
    harness.download(bad).await;
    let events = harness.until_done().await;

    assert!(events
        .iter()
        .any(|e| matches!(e, BackendEvent::PlaylistDetected { entries: 12 })));
    assert!(matches!(events.last(), Some(BackendEvent::Error(_))));
    assert_eq!(picker.asked.load(Ordering::SeqCst), 1);
    assert!(extractor.retrievals().is_empty());
}

#[tokio::test]
async fn playlist_slice_reaches_extractor() {
    let dir = tempdir().unwrap();
    let extractor = Arc::new(FakeExtractor::playlist(12, vec![muxed("22", 720, 1200.0)]));
    let mut harness = Harness::start(extractor.clone(), FixedPicker::new(Some("22")), dir.path());

    let mut slice = form("https://www.youtube.com/playlist?list=PL123", DownloadMode::VideoAudio);
    slice.download_all = false;
    slice.start = "2".to_string();
    slice.end = "5".to_string();
    slice.reverse = true;
    harness.download(slice).await;
    let events = harness.until_done().await;

    assert!(matches!(
        events.last(),
        Some(BackendEvent::DownloadFinished(DownloadOutcome::Success { playlist: true }))
    ));
    let (url, options) = &extractor.retrievals()[0];
    assert_eq!(url, "https://youtube.com/playlist?list=PL123");
    assert_eq!(options.playlist_start, Some(2));
    assert_eq!(options.playlist_end, Some(5));
    assert!(options.playlist_reverse);
}

#[tokio::test]
async fn playlist_range_from_selection_overrides_form() {
    let dir = tempdir().unwrap();
    let extractor = Arc::new(FakeExtractor::playlist(8, vec![muxed("22", 720, 1200.0)]));
    // The form said "download all"; the range was filled in while picking
    let picker = FixedPicker::answering(Some(Selection {
        format_id: "22".to_string(),
        playlist: Some(PlaylistChoice {
            download_all: false,
            reverse: false,
            start: "3".to_string(),
            end: "4".to_string(),
        }),
    }));
    let mut harness = Harness::start(extractor.clone(), picker.clone(), dir.path());

    harness
        .download(form("https://www.youtube.com/watch?v=a&list=PL1", DownloadMode::VideoAudio))
        .await;
    let events = harness.until_done().await;

    assert!(matches!(
        events.last(),
        Some(BackendEvent::DownloadFinished(DownloadOutcome::Success { playlist: true }))
    ));
    assert_eq!(*picker.playlist_entries.lock().unwrap(), Some(8));
    let (_, options) = &extractor.retrievals()[0];
    assert!(!options.no_playlist);
    assert_eq!(options.playlist_start, Some(3));
    assert_eq!(options.playlist_end, Some(4));
    assert!(!options.playlist_reverse);
}

#[tokio::test]
async fn single_video_prompt_has_no_playlist_entries() {
    let dir = tempdir().unwrap();
    let extractor = Arc::new(FakeExtractor::with_streams(vec![audio("140", 128.0)]));
    let picker = FixedPicker::new(Some("140"));
    let mut harness = Harness::start(extractor.clone(), picker.clone(), dir.path());

    harness.download(form(URL, DownloadMode::AudioOnly)).await;
    harness.until_done().await;

    assert_eq!(*picker.playlist_entries.lock().unwrap(), None);
    assert!(extractor.retrievals()[0].1.no_playlist);
}

#[tokio::test]
async fn concurrent_requests_run_independently() {
    let dir = tempdir().unwrap();
    let extractor = Arc::new(FakeExtractor::with_streams(vec![audio("140", 128.0)]));
    let mut harness = Harness::start(extractor.clone(), FixedPicker::new(Some("140")), dir.path());

    harness.download(form(URL, DownloadMode::AudioOnly)).await;
    harness
        .download(form("https://youtu.be/other", DownloadMode::AudioOnly))
        .await;

    let mut finished = 0;
    while finished < 2 {
        if let BackendEvent::DownloadFinished(outcome) = harness.next().await {
            assert!(outcome.is_success());
            finished += 1;
        }
    }
    let mut urls: Vec<String> = extractor.retrievals().into_iter().map(|(u, _)| u).collect();
    urls.sort();
    assert_eq!(urls, vec!["https://www.youtube.com/watch?v=abc123", "https://youtu.be/other"]);
    assert_eq!(history_lines(&dir.path().join("download_history.log")).len(), 2);
}
