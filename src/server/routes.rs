use crate::downloader::request::{normalize_url, validate_url};
use crate::downloader::{
    filter_formats, select_by_quality, DownloadMode, DownloadRequest, DownloadUpdate,
    PlaylistSlice, QualityPreference,
};
use crate::server::AppContext;
use crate::utils::error::TubefetchError;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::mpsc;

type ApiResponse = (StatusCode, Json<Value>);

/// Body sent by the browser extension
#[derive(Debug, Deserialize)]
struct DownloadPayload {
    url: Option<String>,
    settings: Option<ExtensionSettings>,
}

#[derive(Debug, Deserialize)]
struct ExtensionSettings {
    #[serde(rename = "downloadType", default)]
    download_type: DownloadMode,
    #[serde(default)]
    quality: QualityPreference,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> ApiResponse {
    (
        status,
        Json(json!({ "success": false, "error": message.into() })),
    )
}

fn from_error(err: &TubefetchError) -> ApiResponse {
    let status = if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    error_response(status, err.to_string())
}

pub async fn status() -> Json<Value> {
    Json(json!({
        "status": "running",
        "message": "Tubefetch integration endpoint is running",
    }))
}

pub async fn download(State(ctx): State<AppContext>, body: Bytes) -> ApiResponse {
    let payload: DownloadPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("Rejected download request: {}", e);
            return error_response(StatusCode::BAD_REQUEST, format!("Invalid JSON: {}", e));
        }
    };

    let (raw_url, settings) = match (payload.url, payload.settings) {
        (Some(url), Some(settings)) if !url.trim().is_empty() => (url, settings),
        _ => {
            return from_error(&TubefetchError::MissingField(
                "url and settings".to_string(),
            ))
        }
    };

    let url = normalize_url(&raw_url);
    if let Err(e) = validate_url(&url) {
        return from_error(&e);
    }

    tracing::info!(
        "Extension request: {} ({}, {:?})",
        url,
        settings.download_type.wire_name(),
        settings.quality
    );

    let probe = match ctx.extractor.probe(&url).await {
        Ok(probe) => probe,
        Err(e) => {
            tracing::error!("Probe failed for {}: {}", url, e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };

    let ranked = filter_formats(&probe.streams, settings.download_type);
    let Some(chosen) = select_by_quality(&ranked, settings.quality) else {
        return from_error(&TubefetchError::NoFormats(
            settings.download_type.wire_name().to_string(),
        ));
    };
    let format_id = chosen.format_id.clone();

    let stored = ctx.settings.load();
    let mut request = DownloadRequest::new(
        url,
        settings.download_type,
        format_id.clone(),
        stored.download_path,
        stored.format,
    );
    if probe.is_playlist {
        request = request.with_playlist(PlaylistSlice::all(false));
    }

    let (updates_tx, mut updates_rx) = mpsc::channel(16);
    if let Err(e) = ctx.orchestrator.start(request, updates_tx) {
        return from_error(&e);
    }

    // Nobody watches endpoint downloads; keep the channel drained
    tokio::spawn(async move {
        while let Some(update) = updates_rx.recv().await {
            if let DownloadUpdate::Finished(outcome) = update {
                tracing::info!("Extension download finished: {}", outcome.history_text());
            }
        }
    });

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Download started",
            "format_id": format_id,
        })),
    )
}
