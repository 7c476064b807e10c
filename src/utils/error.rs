//! Error handling for Tubefetch

use thiserror::Error;

/// Main error type for Tubefetch
#[derive(Debug, Error)]
pub enum TubefetchError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    YtDlpNotFound,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid request data. Required: {0}")]
    MissingField(String),

    #[error("{0}")]
    InvalidPlaylistRange(String),

    #[error("Failed to fetch formats: {0}")]
    ExtractionError(String),

    #[error("No formats found for type: {0}")]
    NoFormats(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl TubefetchError {
    /// Whether the error comes from caller input rather than the environment.
    ///
    /// The endpoint maps these to `400 Bad Request`.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TubefetchError::InvalidUrl(_)
                | TubefetchError::MissingField(_)
                | TubefetchError::InvalidPlaylistRange(_)
                | TubefetchError::NoFormats(_)
        )
    }
}
