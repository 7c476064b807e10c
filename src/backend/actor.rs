use super::messages::{BackendCommand, BackendEvent, DownloadForm};
use super::picker::{ChannelPicker, StreamPicker};
use crate::downloader::request::{normalize_url, validate_url};
use crate::downloader::{filter_formats, DownloadOrchestrator, DownloadRequest, DownloadUpdate};
use crate::extractor::{Extractor, ProbeResult};
use crate::utils::config::SettingsStore;
use crate::utils::error::TubefetchError;
use crate::utils::history::HistoryLog;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info};

const UPDATE_BUFFER: usize = 64;

pub struct BackendActor {
    receiver: mpsc::Receiver<BackendCommand>,
    workflow: Workflow,
}

/// Everything one download workflow needs; cloned into each request's task
#[derive(Clone)]
struct Workflow {
    sender: mpsc::Sender<BackendEvent>,
    extractor: Arc<dyn Extractor>,
    orchestrator: DownloadOrchestrator,
    settings: SettingsStore,
    picker: Arc<dyn StreamPicker>,
    // Per-session probe cache, keyed by normalized URL
    probe_cache: Arc<Mutex<HashMap<String, ProbeResult>>>,
}

impl BackendActor {
    pub fn new(
        receiver: mpsc::Receiver<BackendCommand>,
        sender: mpsc::Sender<BackendEvent>,
        extractor: Arc<dyn Extractor>,
        settings: SettingsStore,
        history: HistoryLog,
    ) -> Self {
        let picker = Arc::new(ChannelPicker::new(sender.clone()));
        Self::with_picker(receiver, sender, extractor, settings, history, picker)
    }

    /// Same as [`BackendActor::new`] with a custom selection service
    pub fn with_picker(
        receiver: mpsc::Receiver<BackendCommand>,
        sender: mpsc::Sender<BackendEvent>,
        extractor: Arc<dyn Extractor>,
        settings: SettingsStore,
        history: HistoryLog,
        picker: Arc<dyn StreamPicker>,
    ) -> Self {
        let orchestrator = DownloadOrchestrator::new(extractor.clone(), history);
        Self {
            receiver,
            workflow: Workflow {
                sender,
                extractor,
                orchestrator,
                settings,
                picker,
                probe_cache: Arc::new(Mutex::new(HashMap::new())),
            },
        }
    }

    pub async fn run(mut self) {
        info!("BackendActor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                BackendCommand::Download(form) => {
                    let workflow = self.workflow.clone();
                    tokio::spawn(async move {
                        workflow.handle_download(form).await;
                    });
                }
                BackendCommand::Shutdown => {
                    info!("BackendActor shutting down");
                    break;
                }
            }
        }
    }
}

impl Workflow {
    async fn emit(&self, event: BackendEvent) {
        let _ = self.sender.send(event).await;
    }

    async fn fail(&self, err: impl std::fmt::Display) {
        error!("Download request failed: {}", err);
        self.emit(BackendEvent::Error(err.to_string())).await;
    }

    async fn handle_download(&self, form: DownloadForm) {
        // 1. URL validation, no network
        let url = normalize_url(&form.url);
        if let Err(e) = validate_url(&url) {
            self.fail(e).await;
            return;
        }

        // 2. Probe, or reuse this session's result
        let probe = match self.probe(&url).await {
            Ok(probe) => probe,
            Err(e) => {
                self.fail(e).await;
                return;
            }
        };
        if probe.is_playlist {
            self.emit(BackendEvent::PlaylistDetected {
                entries: probe.entry_count,
            })
            .await;
        }

        // 3. Filter for the chosen mode
        let candidates = filter_formats(&probe.streams, form.mode);
        if candidates.is_empty() {
            self.fail(TubefetchError::NoFormats(form.mode.wire_name().to_string()))
                .await;
            return;
        }

        // 4. Ask for a stream; playlist options may be edited meanwhile
        let playlist_entries = probe.is_playlist.then_some(probe.entry_count);
        let selection = match self
            .picker
            .pick(probe.title.as_deref(), form.mode, &candidates, playlist_entries)
            .await
        {
            Some(selection) => selection,
            None => {
                info!("Selection cancelled for {}", url);
                self.emit(BackendEvent::SelectionCancelled).await;
                return;
            }
        };

        // 5. Build and validate the request
        let settings = self.settings.load();
        let mut request = DownloadRequest::new(
            url,
            form.mode,
            selection.format_id,
            settings.download_path,
            settings.format,
        );
        if probe.is_playlist {
            let choice = selection
                .playlist
                .unwrap_or_else(|| form.playlist_choice());
            match choice.to_slice() {
                Ok(slice) => request = request.with_playlist(slice),
                Err(e) => {
                    self.fail(e).await;
                    return;
                }
            }
        }

        // 6. Retrieve
        let (updates_tx, mut updates_rx) = mpsc::channel(UPDATE_BUFFER);
        if let Err(e) = self.orchestrator.start(request, updates_tx) {
            self.fail(e).await;
            return;
        }
        self.emit(BackendEvent::DownloadStarted).await;

        while let Some(update) = updates_rx.recv().await {
            let event = match update {
                DownloadUpdate::Progress(pct) => BackendEvent::DownloadProgress(pct),
                DownloadUpdate::Finished(outcome) => BackendEvent::DownloadFinished(outcome),
            };
            self.emit(event).await;
        }
    }

    async fn probe(&self, url: &str) -> anyhow::Result<ProbeResult> {
        if let Some(cached) = self.probe_cache.lock().await.get(url) {
            debug!("Probe cache hit for {}", url);
            return Ok(cached.clone());
        }

        self.emit(BackendEvent::ProbeStarted).await;
        let probe = self.extractor.probe(url).await?;
        self.probe_cache
            .lock()
            .await
            .insert(url.to_string(), probe.clone());
        Ok(probe)
    }
}
