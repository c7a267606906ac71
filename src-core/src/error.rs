//! Error types
//!
//! `RemoteError` covers transport and service failures of the remote data
//! service; `AuthError` is the user-facing message of a failed auth call.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Authentication failure, rendered verbatim to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
    pub status: Option<u16>,
}

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }
}

impl From<RemoteError> for AuthError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Api { status, message } => AuthError::with_status(status, message),
            other => AuthError::new(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing configuration value: {0}")]
    Missing(&'static str),

    #[error("invalid service URL: {0}")]
    InvalidUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_keeps_message_for_user() {
        let err: AuthError = RemoteError::Api {
            status: 400,
            message: "Invalid login credentials".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Invalid login credentials");
        assert_eq!(err.status, Some(400));
    }
}
