use thiserror::Error;

/// Everything that can go wrong while tracking a single signal.
/// None of these ever reach the page visitor; callers log and move on.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Endpoint missing or malformed. The transport degrades to a no-op.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Network failure or non-2xx response from the collector.
    #[error("transport error: {0}")]
    Transport(String),

    /// Ambient page/browser state could not be read. Fatal to one event only.
    #[error("page context unreadable: {0}")]
    ContextRead(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for TrackerError {
    fn from(e: reqwest::Error) -> Self {
        TrackerError::Transport(e.to_string())
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;
