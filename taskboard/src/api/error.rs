//! Typed error type for task API calls.

use thiserror::Error;

/// Error type for all calls to the task backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or connection failure.
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),
    /// 404 -- task not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// 409 -- the version sent is stale.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Other API error with status code and body.
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
    /// A success response whose body could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),
    /// Base URL could not be joined with an endpoint path.
    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

impl ApiError {
    /// True when the backend detected a concurrent edit
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// True when the request never produced an HTTP response
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ApiError::Api {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "API error (500): boom");
        assert_eq!(ApiError::Conflict("v3".into()).to_string(), "conflict: v3");
    }

    #[test]
    fn test_classification() {
        assert!(ApiError::Conflict(String::new()).is_conflict());
        assert!(!ApiError::NotFound(String::new()).is_conflict());
        assert!(!ApiError::Decode(String::new()).is_transport());
    }
}
