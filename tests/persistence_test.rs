//! Settings file and history log on a real filesystem.

use chrono::NaiveDateTime;
use std::sync::Arc;
use tempfile::tempdir;
use tubefetch::utils::history::EMPTY_HISTORY_MESSAGE;
use tubefetch::utils::{get_downloads_dir, AppPaths, HistoryEntry, HistoryLog, SettingsStore};

#[test]
fn settings_round_trip_through_app_paths() {
    let dir = tempdir().expect("temp dir");
    let paths = AppPaths::resolve(Some(dir.path()));
    let store = SettingsStore::new(paths.settings_file());

    let defaults = store.load();
    assert_eq!(defaults.download_path, get_downloads_dir());
    assert_eq!(defaults.format, "mp4");

    let mut settings = defaults.clone();
    settings.set_download_path(dir.path().join("videos").to_str().unwrap());
    settings.set_format("MKV");
    store.save(&settings).expect("save settings");

    let reloaded = SettingsStore::new(paths.settings_file()).load();
    assert_eq!(reloaded.download_path, dir.path().join("videos"));
    assert_eq!(reloaded.format, "mkv");
}

#[test]
fn settings_file_written_by_hand_is_merged() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"format": "webm", "theme": "dark"}"#).unwrap();

    let store = SettingsStore::new(&path);
    let settings = store.load();
    assert_eq!(settings.format, "webm");
    assert_eq!(settings.download_path, get_downloads_dir());

    store.save(&settings).unwrap();
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["theme"], "dark");
    assert_eq!(raw["format"], "webm");
    assert!(raw["download_path"].is_string());
}

#[tokio::test]
async fn history_appends_are_line_oriented() {
    let dir = tempdir().expect("temp dir");
    let log = HistoryLog::new(dir.path().join("download_history.log"));
    assert_eq!(log.read_all().await, EMPTY_HISTORY_MESSAGE);

    let first = HistoryEntry::now("video+audio:22", "https://youtu.be/a", "Success");
    let second = HistoryEntry::now("audio-only:140", "https://youtu.be/b", "Failed: boom");
    log.append(&first).await;
    log.append(&second).await;

    let content = log.read_all().await;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("| video+audio:22 | https://youtu.be/a | Success"));
    assert!(lines[1].ends_with("| audio-only:140 | https://youtu.be/b | Failed: boom"));

    let timestamp = lines[0].split(" | ").next().unwrap();
    assert!(NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").is_ok());
}

#[tokio::test]
async fn concurrent_writers_do_not_interleave() {
    let dir = tempdir().expect("temp dir");
    let log = Arc::new(HistoryLog::new(dir.path().join("download_history.log")));

    let mut handles = Vec::new();
    for i in 0..16 {
        let log = log.clone();
        handles.push(tokio::spawn(async move {
            let entry = HistoryEntry::now(
                format!("video-only:{}", i),
                format!("https://youtu.be/{}", i),
                "Success",
            );
            log.append(&entry).await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let content = log.read_all().await;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 16);
    assert!(lines.iter().all(|l| l.split(" | ").count() == 4));
}
