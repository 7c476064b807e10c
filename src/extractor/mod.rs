pub mod models;
pub mod options;
pub mod traits;
pub mod ytdlp;

pub use models::{ProbeResult, StreamDescriptor};
pub use options::RetrievalOptions;
pub use traits::Extractor;
pub use ytdlp::YtDlpExtractor;
