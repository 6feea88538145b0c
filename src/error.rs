//! Error types for nso-restconf

use thiserror::Error;

/// Main error type for RESTCONF client operations
#[derive(Debug, Error)]
pub enum RestconfError {
    /// Invalid client setup (empty host, malformed credentials, ...)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Resource path that cannot be rendered or parsed
    #[error("Invalid resource path: {0}")]
    InvalidPath(String),

    /// Credentials rejected (HTTP 401/403)
    #[error("Authentication failed ({status}) for {url}: {message}")]
    Auth {
        status: u16,
        url: String,
        message: String,
    },

    /// Resource not found (HTTP 404)
    #[error("Resource not found: {url}: {message}")]
    NotFound { url: String, message: String },

    /// Request rejected by the server (HTTP 400)
    #[error("Validation error for {url}: {message}")]
    Validation { url: String, message: String },

    /// Server side failure (HTTP 5xx)
    #[error("Server error ({status}) for {url}: {message}")]
    Server {
        status: u16,
        url: String,
        message: String,
    },

    /// Any other non-success status (405, 409, ...)
    #[error("Unexpected status ({status}) for {url}: {message}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        message: String,
    },

    /// Connection failure or timeout
    #[error("Transport error: {0}")]
    Transport(String),

    /// Body that could not be decoded; carries the raw body
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String, body: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (config file loading)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RestconfError {
    /// HTTP status code behind this error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. }
            | Self::Server { status, .. }
            | Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::Validation { .. } => Some(400),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<reqwest::Error> for RestconfError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            RestconfError::Transport(format!("request timed out: {error}"))
        } else {
            RestconfError::Transport(error.to_string())
        }
    }
}

/// Result type alias for RESTCONF client operations
pub type Result<T> = std::result::Result<T, RestconfError>;
