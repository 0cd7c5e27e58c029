//! Error types for streamrule.

use thiserror::Error;

/// Error type for streamrule operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed caller input
    #[error("invalid request: {0}")]
    Validation(String),

    /// Upstream document could not be fetched
    #[error("upstream fetch failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("upstream {url} returned HTTP {status}")]
    UpstreamStatus { url: String, status: u16 },

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for streamrule operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification used by the boundary layer to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Client fault, detected before any network or parsing work
    Validation,
    /// The remote document fetch failed or timed out
    Upstream,
    /// Anything else; detail is logged, not surfaced
    Internal,
}

impl ErrorKind {
    /// HTTP status a boundary layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::Upstream => 502,
            ErrorKind::Internal => 500,
        }
    }
}

impl Error {
    /// Shorthand for a validation failure.
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Upstream(_) | Error::UpstreamStatus { .. } => ErrorKind::Upstream,
            Error::Yaml(_) | Error::Json(_) | Error::Io(_) | Error::Config(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Message that is safe to hand back to a caller.
    ///
    /// Internal failures are logged and replaced by a generic message.
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::Upstream => self.to_string(),
            ErrorKind::Internal => {
                log::error!("internal error: {}", self);
                "internal error while generating configuration".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(
            Error::UpstreamStatus {
                url: "http://test".to_string(),
                status: 404
            }
            .kind(),
            ErrorKind::Upstream
        );
        assert_eq!(Error::Config("bad".to_string()).kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::Validation.status_code(), 400);
        assert_eq!(ErrorKind::Upstream.status_code(), 502);
        assert_eq!(ErrorKind::Internal.status_code(), 500);
    }

    #[test]
    fn test_public_message_hides_internal_detail() {
        let err = Error::Config("secret path /etc/x".to_string());
        assert!(!err.public_message().contains("/etc/x"));

        let err = Error::validation("ipv4 is malformed");
        assert!(err.public_message().contains("ipv4 is malformed"));
    }
}
