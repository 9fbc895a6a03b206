//! Error types for API access

use thiserror::Error;

use crate::session::SessionError;

/// Result type alias for RCS client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for RCS client operations
#[derive(Error, Debug)]
pub enum Error {
    /// Non-2xx response returned by the backend
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        body: String,
    },

    /// Envelope came back with `success: false`
    #[error("request rejected: {message}")]
    Rejected { message: String },

    /// Envelope reported success but carried no `data`
    #[error("response envelope has no data")]
    MissingData,

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure raised by a non-reqwest transport
    #[error("transport error: {0}")]
    Transport(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Identifier that cannot be used as a path segment
    #[error("invalid id: {0:?}")]
    InvalidId(String),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Session could not be read or validated
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

impl Error {
    /// HTTP status carried by the error, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if this is an authentication error (401)
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Returns true if this is an authorization error (403)
    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    /// Returns true if this is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns true if the request never produced an HTTP response
    pub fn is_transport(&self) -> bool {
        match self {
            Error::Transport(_) => true,
            Error::Http(e) => e.status().is_none(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16) -> Error {
        Error::Api {
            status,
            message: "nope".into(),
            body: "{}".into(),
        }
    }

    #[test]
    fn test_status_predicates() {
        assert!(api(401).is_unauthorized());
        assert!(api(403).is_forbidden());
        assert!(api(404).is_not_found());
        assert!(!api(500).is_unauthorized());
        assert_eq!(api(502).status(), Some(502));
    }

    #[test]
    fn test_non_http_errors_have_no_status() {
        assert_eq!(Error::MissingData.status(), None);
        assert!(Error::Transport("connection reset".into()).is_transport());
        assert!(!Error::Rejected { message: "x".into() }.is_transport());
    }

    #[test]
    fn test_display_includes_status() {
        assert_eq!(api(409).to_string(), "API error (409): nope");
    }
}
