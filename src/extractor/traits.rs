use crate::downloader::progress::ProgressEvent;
use crate::extractor::models::ProbeResult;
use crate::extractor::options::RetrievalOptions;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Core trait for the external extraction tool
///
/// This trait isolates the application from how streams are listed and
/// fetched, so the workflow can run against yt-dlp or a test double.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Lists the streams available at `url` without downloading media
    async fn probe(&self, url: &str) -> Result<ProbeResult>;

    /// Retrieves `url` with `options`, reporting progress on `progress`.
    ///
    /// Returns the tool's result code; anything other than zero is a failed
    /// retrieval. The sender is dropped when the retrieval ends.
    async fn retrieve(
        &self,
        url: &str,
        options: &RetrievalOptions,
        progress: mpsc::Sender<ProgressEvent>,
    ) -> Result<i32>;
}
