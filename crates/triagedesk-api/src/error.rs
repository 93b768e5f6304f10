//! Error types for backend API calls.

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the backend.
///
/// `Http`, `Json` and `Url` are transport-level failures; `Application`
/// carries a well-formed response whose `status` field signals failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL building error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The configured base URL cannot carry path segments.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The backend answered with a non-success application status.
    #[error("Backend reported {status}: {message}")]
    Application {
        /// Application status code (e.g. `error`, `partial_success`).
        status: String,
        /// Human-readable message from the backend, if any.
        message: String,
    },

    /// The backend answered with an unexpected HTTP status code.
    #[error("Unexpected HTTP status: {0}")]
    UnexpectedStatus(reqwest::StatusCode),
}

impl Error {
    /// Creates an application error from status code and message.
    #[must_use]
    pub fn application(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Application {
            status: status.into(),
            message: message.into(),
        }
    }

    /// Returns `true` for transport-level failures (network, parse, HTTP).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::Json(_)
                | Self::Url(_)
                | Self::InvalidBaseUrl(_)
                | Self::UnexpectedStatus(_)
        )
    }

    /// The message to surface to the user for this error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Application { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}
