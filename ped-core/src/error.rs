/// Error types for the pedestrian data pipeline
use thiserror::Error;

/// Failure of a single backend fetch.
///
/// These never escape the session: the reducers turn them into an empty
/// collection plus the `Display` text as the observable error string.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never produced a response
    #[error("Request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status
    #[error("Backend returned HTTP {0}")]
    Status(u16),

    /// The response body was not valid JSON
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// No backend is reachable in this environment (e.g. no browser window)
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}

#[cfg(feature = "api")]
impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Parse(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// Type alias for fetch results
pub type FetchResult<T> = std::result::Result<T, FetchError>;
