use thiserror::Error;

/// Errors raised at the relay, configuration and settings seams.
///
/// Controller operations never return these; they turn them into log entries.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Relay unreachable, non-JSON reply, or any other failure below the HTTP layer.
    #[error("{0}")]
    Transport(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        RemoteError::Transport(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard command `{command}` failed: {reason}")]
    Command { command: String, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
