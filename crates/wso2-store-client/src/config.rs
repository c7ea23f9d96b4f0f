//! Portal connection configuration.

use crate::error::{StoreError, StoreResult};
use std::path::PathBuf;

/// Default HTTP timeout for portal calls, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for a WSO2 API Store portal.
///
/// Host, user, and password are validated at construction; a missing
/// value fails before any network call is attempted. The [`Debug`]
/// impl redacts the password.
#[derive(Clone)]
pub struct PortalConfig {
    /// Portal base URL, e.g. `https://apim.example.com:9443`.
    pub host: String,
    /// Store username.
    pub user: String,
    /// Store password.
    pub password: String,
    /// Append human-readable progress lines to the log file.
    pub debug: bool,
    /// Skip TLS certificate validation. Lab and test portals only;
    /// never enable this against a production portal.
    pub accept_invalid_certs: bool,
    /// HTTP timeout applied to every portal call.
    pub timeout_secs: u64,
    /// Progress log path override. Defaults to `wso2-provision.log`
    /// next to the running binary.
    pub log_file: Option<PathBuf>,
}

impl PortalConfig {
    /// Build a config with defaults, failing fast on blank fields.
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> StoreResult<Self> {
        let host = host.into();
        let user = user.into();
        let password = password.into();

        if host.trim().is_empty() {
            return Err(StoreError::Config("portal host is required".to_string()));
        }
        if user.trim().is_empty() {
            return Err(StoreError::Config("portal user is required".to_string()));
        }
        if password.trim().is_empty() {
            return Err(StoreError::Config(
                "portal password is required".to_string(),
            ));
        }

        Ok(Self {
            host,
            user,
            password,
            debug: false,
            accept_invalid_certs: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_file: None,
        })
    }

    /// Enable or disable the progress log.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Disable TLS certificate validation (lab portals only).
    #[must_use]
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Override the HTTP timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Override the progress log path.
    #[must_use]
    pub fn with_log_file(mut self, path: PathBuf) -> Self {
        self.log_file = Some(path);
        self
    }
}

impl std::fmt::Debug for PortalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("debug", &self.debug)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("timeout_secs", &self.timeout_secs)
            .field("log_file", &self.log_file)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_host() {
        let err = PortalConfig::new("", "admin", "admin").unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
        assert!(err.to_string().contains("host"));
    }

    #[test]
    fn rejects_blank_user() {
        let err = PortalConfig::new("https://portal", " ", "admin").unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
        assert!(err.to_string().contains("user"));
    }

    #[test]
    fn rejects_blank_password() {
        let err = PortalConfig::new("https://portal", "admin", "").unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn defaults_are_safe() {
        let config = PortalConfig::new("https://portal", "admin", "admin").unwrap();
        assert!(!config.debug);
        assert!(!config.accept_invalid_certs);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn debug_output_redacts_password() {
        let config = PortalConfig::new("https://portal", "admin", "hunter2").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
