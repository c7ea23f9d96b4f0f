//! Error types for the store provisioning workflow.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure classes of a provisioning run.
///
/// A run produces at most one of these: no stage retries, and only a
/// duplicate-subscription response is ever recovered locally. Remote
/// portal messages are embedded verbatim where available.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Missing or unusable configuration, including a portal host
    /// that could not be reached during login.
    #[error("configuration error: {0}")]
    Config(String),

    /// The portal rejected the login credentials.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// An API or application named in the spec does not exist on the
    /// portal.
    #[error("not found: {0}")]
    NotFound(String),

    /// A structured error payload from a portal call, with the remote
    /// message embedded verbatim.
    #[error("portal error: {0}")]
    Remote(String),

    /// A well-formed transport response missing an expected field,
    /// e.g. no session cookie after a successful login.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Transport-level failure on a post-login call.
    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            StoreError::Network(format!("connection failed: {e}"))
        } else if e.is_timeout() {
            StoreError::Network("request timed out".to_string())
        } else {
            StoreError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_embeds_remote_message() {
        let err = StoreError::Remote("Name already exists".to_string());
        assert!(err.to_string().contains("Name already exists"));
    }

    #[test]
    fn display_names_the_failure_class() {
        assert!(StoreError::Auth("bad password".into())
            .to_string()
            .starts_with("authentication failed"));
        assert!(StoreError::NotFound("API \"X\"".into())
            .to_string()
            .starts_with("not found"));
    }
}
