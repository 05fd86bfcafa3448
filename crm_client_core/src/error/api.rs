//! Classroom API error types

use thiserror::Error;

/// Errors returned by the classroom REST API client
#[derive(Error, Debug)]
pub enum ApiError {
    /// No token in the environment and `gh auth token` gave nothing
    #[error("No GitHub token available. Set GH_TOKEN or GITHUB_TOKEN, or log in with `gh auth login`")]
    MissingToken,

    /// Token cannot be sent as an HTTP header
    #[error("GitHub token contains characters that are not allowed in an HTTP header")]
    InvalidToken,

    /// HTTP client could not be constructed
    #[error("Failed to create API client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    /// Request could not be sent or the connection failed
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("{url} returned HTTP {status}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// Create a status error
    pub fn status(status: u16, url: &str, message: &str) -> Self {
        Self::Status {
            status,
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    /// True for 404 responses
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// True when the failure is on the network or server side
    pub fn is_network(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error() {
        let error = ApiError::status(404, "https://api.github.com/assignments/7", "Not Found");
        assert!(error.is_not_found());
        assert!(!error.is_network());
        assert!(error.to_string().contains("HTTP 404"));
    }

    #[test]
    fn test_server_error_is_network() {
        let error = ApiError::status(502, "https://api.github.com/classrooms", "Bad Gateway");
        assert!(error.is_network());
    }
}
