//! GUI components

pub mod format_picker;
pub mod playlist_options;
pub mod progress_bar;
pub mod url_input;

// Re-export for convenience
pub use format_picker::FormatPicker;
pub use playlist_options::playlist_options;
pub use progress_bar::progress_bar;
pub use url_input::url_input;
