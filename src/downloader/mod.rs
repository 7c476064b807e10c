//! Download workflow: filter, request, options, orchestration

pub mod filter;
pub mod options;
pub mod orchestrator;
pub mod progress;
pub mod request;

pub use filter::{filter_formats, select_by_quality, DownloadMode, QualityPreference};
pub use orchestrator::DownloadOrchestrator;
pub use progress::{DownloadOutcome, DownloadUpdate, ProgressEvent};
pub use request::{DownloadRequest, PlaylistSlice};
