//! Stream selection as an awaited request/response
//!
//! The workflow asks a [`StreamPicker`] for a format id and waits. The GUI
//! implementation forwards the question as a [`SelectionPrompt`] event and
//! the modal picker answers through it.

use crate::backend::messages::{BackendEvent, PlaylistChoice};
use crate::downloader::DownloadMode;
use crate::extractor::StreamDescriptor;
use async_trait::async_trait;
use std::fmt;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

/// The answer to a selection prompt
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub format_id: String,
    /// Playlist options read when the choice was confirmed. `None` keeps
    /// what the form held when the request was made.
    pub playlist: Option<PlaylistChoice>,
}

impl Selection {
    pub fn stream(format_id: impl Into<String>) -> Self {
        Self {
            format_id: format_id.into(),
            playlist: None,
        }
    }
}

#[async_trait]
pub trait StreamPicker: Send + Sync {
    /// Returns the user's choice, or `None` if they cancelled.
    ///
    /// `playlist_entries` is set when the URL resolved to a playlist.
    async fn pick(
        &self,
        title: Option<&str>,
        mode: DownloadMode,
        streams: &[StreamDescriptor],
        playlist_entries: Option<usize>,
    ) -> Option<Selection>;
}

/// A pending selection. Cloneable so it can ride inside GUI messages;
/// only the first response is delivered.
#[derive(Clone)]
pub struct SelectionPrompt {
    pub title: Option<String>,
    pub mode: DownloadMode,
    pub streams: Arc<Vec<StreamDescriptor>>,
    pub playlist_entries: Option<usize>,
    reply: Arc<Mutex<Option<oneshot::Sender<Option<Selection>>>>>,
}

impl SelectionPrompt {
    pub fn new(
        title: Option<String>,
        mode: DownloadMode,
        streams: Vec<StreamDescriptor>,
        playlist_entries: Option<usize>,
    ) -> (Self, oneshot::Receiver<Option<Selection>>) {
        let (tx, rx) = oneshot::channel();
        let prompt = Self {
            title,
            mode,
            streams: Arc::new(streams),
            playlist_entries,
            reply: Arc::new(Mutex::new(Some(tx))),
        };
        (prompt, rx)
    }

    /// Answer the prompt. Returns false if it was already answered or the
    /// workflow stopped waiting.
    pub fn respond(&self, choice: Option<Selection>) -> bool {
        let sender = match self.reply.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        match sender {
            Some(tx) => tx.send(choice).is_ok(),
            None => false,
        }
    }
}

impl fmt::Debug for SelectionPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionPrompt")
            .field("title", &self.title)
            .field("mode", &self.mode)
            .field("streams", &self.streams.len())
            .field("playlist_entries", &self.playlist_entries)
            .finish()
    }
}

/// Picker that asks the GUI over the backend event channel
pub struct ChannelPicker {
    events: mpsc::Sender<BackendEvent>,
}

impl ChannelPicker {
    pub fn new(events: mpsc::Sender<BackendEvent>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl StreamPicker for ChannelPicker {
    async fn pick(
        &self,
        title: Option<&str>,
        mode: DownloadMode,
        streams: &[StreamDescriptor],
        playlist_entries: Option<usize>,
    ) -> Option<Selection> {
        let (prompt, reply) = SelectionPrompt::new(
            title.map(str::to_string),
            mode,
            streams.to_vec(),
            playlist_entries,
        );

        if self
            .events
            .send(BackendEvent::SelectionRequested(prompt))
            .await
            .is_err()
        {
            warn!("GUI is gone; treating selection as cancelled");
            return None;
        }

        // A dropped prompt counts as a cancel
        reply.await.ok().flatten()
    }
}
