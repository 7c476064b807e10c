//! Runs one retrieval per spawned task and reports back over a channel

use crate::downloader::options::build_retrieval_options;
use crate::downloader::progress::{DownloadOutcome, DownloadUpdate, ProgressEvent};
use crate::downloader::request::DownloadRequest;
use crate::extractor::Extractor;
use crate::utils::error::TubefetchError;
use crate::utils::history::{HistoryEntry, HistoryLog};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

const PROGRESS_BUFFER: usize = 64;

#[derive(Clone)]
pub struct DownloadOrchestrator {
    extractor: Arc<dyn Extractor>,
    history: HistoryLog,
}

impl DownloadOrchestrator {
    pub fn new(extractor: Arc<dyn Extractor>, history: HistoryLog) -> Self {
        Self { extractor, history }
    }

    /// Validate `request` and start it on a background task.
    ///
    /// Validation errors come back immediately, before any retrieval. Once
    /// started, the task sends progress on `updates`, then
    /// `Finished(outcome)`, then `Progress(0.0)`.
    pub fn start(
        &self,
        request: DownloadRequest,
        updates: mpsc::Sender<DownloadUpdate>,
    ) -> Result<JoinHandle<DownloadOutcome>, TubefetchError> {
        request.validate()?;

        let this = self.clone();
        Ok(tokio::spawn(async move { this.run(request, updates).await }))
    }

    async fn run(
        &self,
        request: DownloadRequest,
        updates: mpsc::Sender<DownloadUpdate>,
    ) -> DownloadOutcome {
        let options = build_retrieval_options(&request);
        info!(
            "Starting download {} ({}) into {}",
            request.url,
            request.history_kind(),
            request.output_dir.display()
        );

        let (progress_tx, mut progress_rx) = mpsc::channel::<ProgressEvent>(PROGRESS_BUFFER);

        let retrieval = self.extractor.retrieve(&request.url, &options, progress_tx);
        let relay = async {
            while let Some(event) = progress_rx.recv().await {
                if let Some(pct) = event.percentage() {
                    let _ = updates.send(DownloadUpdate::Progress(pct)).await;
                }
            }
        };
        let (result, ()) = tokio::join!(retrieval, relay);

        let outcome = match result {
            Ok(0) => DownloadOutcome::Success {
                playlist: request.is_playlist,
            },
            Ok(code) => DownloadOutcome::Failed(format!("yt-dlp exited with code {}", code)),
            Err(e) => DownloadOutcome::Failed(e.to_string()),
        };

        match &outcome {
            DownloadOutcome::Success { .. } => info!("Download finished: {}", request.url),
            DownloadOutcome::Failed(msg) => error!("Download failed for {}: {}", request.url, msg),
        }

        self.history
            .append(&HistoryEntry::now(
                request.history_kind(),
                &request.url,
                outcome.history_text(),
            ))
            .await;

        let _ = updates.send(DownloadUpdate::Finished(outcome.clone())).await;
        let _ = updates.send(DownloadUpdate::Progress(0.0)).await;

        outcome
    }
}
