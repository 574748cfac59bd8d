use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: usize, limit: usize },

    #[error("Server misconfigured: {0}")]
    ConfigurationError(String),

    #[error("Detection service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Detection service returned {status}: {body}")]
    UpstreamError { status: u16, body: String },

    #[error("Unexpected detection service response: {0}")]
    MalformedUpstreamResponse(String),

    #[error("Failed to write processed image: {0}")]
    StorageWriteError(String),

    #[error("Failed to read processed image: {0}")]
    StorageReadError(String),

    #[error("Not found")]
    NotFound,
}

impl CoreError {
    /// True for failures caused by the remote detection workflow.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            CoreError::UpstreamUnavailable(_)
                | CoreError::UpstreamError { .. }
                | CoreError::MalformedUpstreamResponse(_)
        )
    }
}
