//! Tubefetch - YouTube downloader
//!
//! A desktop front-end over yt-dlp with a small local HTTP endpoint so a
//! browser extension can start downloads.

use anyhow::Result;
use clap::Parser;
use iced::Application;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tubefetch::backend::{BackendActor, BackendCommand};
use tubefetch::downloader::DownloadOrchestrator;
use tubefetch::extractor::{Extractor, YtDlpExtractor};
use tubefetch::gui::{AppFlags, TubefetchApp};
use tubefetch::server::{shutdown_signal, AppContext, IntegrationServer, DEFAULT_BIND_ADDR};
use tubefetch::utils::{AppPaths, HistoryLog, SettingsStore};

#[derive(Parser)]
#[command(name = "tubefetch", version, about)]
struct Args {
    /// Run only the integration endpoint, without a window
    #[arg(long)]
    headless: bool,

    /// Address the integration endpoint listens on
    #[arg(long, default_value = DEFAULT_BIND_ADDR)]
    bind: SocketAddr,

    /// Do not start the integration endpoint
    #[arg(long, conflicts_with = "headless")]
    no_server: bool,

    /// Directory for settings.json and download_history.log
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let paths = AppPaths::resolve(args.data_dir.as_deref());
    if let Err(e) = std::fs::create_dir_all(&paths.base_dir) {
        warn!(
            "Could not create data directory {}: {}",
            paths.base_dir.display(),
            e
        );
    }
    info!("Using data directory {}", paths.base_dir.display());

    let settings = SettingsStore::new(paths.settings_file());
    let history = HistoryLog::new(paths.history_file());

    let ytdlp = YtDlpExtractor::new();
    if ytdlp.ytdlp_path().is_none() {
        warn_ytdlp_missing();
    }
    let extractor: Arc<dyn Extractor> = Arc::new(ytdlp);

    let runtime = tokio::runtime::Runtime::new()?;

    let orchestrator = DownloadOrchestrator::new(extractor.clone(), history.clone());
    let mut server = IntegrationServer::new(AppContext::new(
        extractor.clone(),
        orchestrator,
        settings.clone(),
    ));

    if args.headless {
        return runtime.block_on(async move {
            server.start(args.bind).await?;
            shutdown_signal().await;
            server.stop().await
        });
    }

    if !args.no_server {
        // The GUI is still useful without the endpoint
        if let Err(e) = runtime.block_on(server.start(args.bind)) {
            error!("Integration endpoint unavailable: {:#}", e);
        }
    }

    let (command_tx, command_rx) = mpsc::channel(32);
    let (event_tx, event_rx) = mpsc::channel(256);
    let actor = BackendActor::new(
        command_rx,
        event_tx,
        extractor,
        settings.clone(),
        history.clone(),
    );
    runtime.spawn(actor.run());

    let flags = AppFlags {
        commands: command_tx.clone(),
        events: Arc::new(Mutex::new(event_rx)),
        settings,
        history,
    };

    let result = TubefetchApp::run(iced::Settings {
        window: iced::window::Settings {
            size: iced::Size::new(960.0, 640.0),
            min_size: Some(iced::Size::new(820.0, 540.0)),
            ..Default::default()
        },
        antialiasing: true,
        ..iced::Settings::with_flags(flags)
    });

    let _ = command_tx.try_send(BackendCommand::Shutdown);
    if let Err(e) = runtime.block_on(server.stop()) {
        warn!("Integration endpoint did not stop cleanly: {:#}", e);
    }

    if let Err(e) = result {
        error!("Failed to start the GUI: {}", e);
        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title("Tubefetch")
            .set_description(format!("Failed to start the application:\n{}", e))
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
        std::process::exit(1);
    }

    Ok(())
}

fn warn_ytdlp_missing() {
    // yt-dlp not found - warn but don't exit, allow app to launch
    // User will see error when they try to download
    warn!("yt-dlp not found; video extraction will fail until it is installed");
    eprintln!("WARNING: yt-dlp not found in common locations");
    eprintln!("Please install yt-dlp:");
    eprintln!("  pip install yt-dlp");
    eprintln!("  or: brew install yt-dlp");
    eprintln!("  or visit: https://github.com/yt-dlp/yt-dlp");
}
