//! Clipboard functionality

use crate::downloader::request::looks_supported;
use arboard::Clipboard;

/// Get clipboard content
pub fn get_clipboard_content() -> Result<String, String> {
    let mut clipboard =
        Clipboard::new().map_err(|e| format!("Failed to access clipboard: {}", e))?;

    clipboard
        .get_text()
        .map_err(|e| format!("Failed to read clipboard: {}", e))
}

/// Clipboard text, if it looks like a link we can download
pub fn supported_url_from_clipboard() -> Option<String> {
    let content = get_clipboard_content().ok()?;
    let content = content.trim();
    looks_supported(content).then(|| content.to_string())
}
