//! Shared test doubles. Nothing here touches the network or yt-dlp.

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::mpsc;
use tubefetch::downloader::ProgressEvent;
use tubefetch::extractor::{Extractor, ProbeResult, RetrievalOptions, StreamDescriptor};

/// Extractor that replays canned probe results and progress
#[derive(Default)]
pub struct FakeExtractor {
    probe_result: Option<ProbeResult>,
    probe_error: Option<String>,
    progress: Vec<ProgressEvent>,
    exit_code: i32,
    retrieve_error: Option<String>,
    probes: AtomicUsize,
    retrievals: Mutex<Vec<(String, RetrievalOptions)>>,
}

impl FakeExtractor {
    pub fn with_streams(streams: Vec<StreamDescriptor>) -> Self {
        Self {
            probe_result: Some(ProbeResult {
                title: Some("Test clip".to_string()),
                is_playlist: false,
                entry_count: 1,
                streams,
            }),
            ..Default::default()
        }
    }

    pub fn playlist(entries: usize, streams: Vec<StreamDescriptor>) -> Self {
        Self {
            probe_result: Some(ProbeResult {
                title: Some("Test playlist".to_string()),
                is_playlist: true,
                entry_count: entries,
                streams,
            }),
            ..Default::default()
        }
    }

    pub fn failing_probe(message: &str) -> Self {
        Self {
            probe_error: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn progress(mut self, events: Vec<ProgressEvent>) -> Self {
        self.progress = events;
        self
    }

    pub fn exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    pub fn failing_retrieve(mut self, message: &str) -> Self {
        self.retrieve_error = Some(message.to_string());
        self
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    pub fn retrievals(&self) -> Vec<(String, RetrievalOptions)> {
        self.retrievals.lock().unwrap().clone()
    }
}

#[async_trait]
impl Extractor for FakeExtractor {
    async fn probe(&self, _url: &str) -> Result<ProbeResult> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.probe_error {
            return Err(anyhow!("{}", message));
        }
        Ok(self.probe_result.clone().unwrap_or_default())
    }

    async fn retrieve(
        &self,
        url: &str,
        options: &RetrievalOptions,
        progress: mpsc::Sender<ProgressEvent>,
    ) -> Result<i32> {
        self.retrievals
            .lock()
            .unwrap()
            .push((url.to_string(), options.clone()));

        for event in &self.progress {
            let _ = progress.send(event.clone()).await;
        }

        match &self.retrieve_error {
            Some(message) => Err(anyhow!("{}", message)),
            None => Ok(self.exit_code),
        }
    }
}

pub fn muxed(id: &str, height: u32, tbr: f64) -> StreamDescriptor {
    StreamDescriptor {
        format_id: id.to_string(),
        ext: "mp4".to_string(),
        height: Some(height),
        tbr: Some(tbr),
        vcodec: Some("avc1.64001F".to_string()),
        acodec: Some("mp4a.40.2".to_string()),
        ..Default::default()
    }
}

pub fn audio(id: &str, abr: f64) -> StreamDescriptor {
    StreamDescriptor {
        format_id: id.to_string(),
        ext: "m4a".to_string(),
        resolution: Some("audio only".to_string()),
        abr: Some(abr),
        acodec: Some("mp4a.40.2".to_string()),
        ..Default::default()
    }
}

pub fn history_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
