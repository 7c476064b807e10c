//! GUI views

pub mod history_view;
pub mod main_view;
pub mod settings_view;

// Re-export for convenience
pub use history_view::history_view;
pub use main_view::main_view;
pub use settings_view::settings_view;
