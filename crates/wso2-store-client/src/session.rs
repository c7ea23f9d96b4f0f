//! Portal login and session-cookie handling.

use crate::client::StoreClient;
use crate::config::PortalConfig;
use crate::error::{StoreError, StoreResult};
use crate::models::StatusResponse;
use reqwest::header::SET_COOKIE;
use tracing::debug;

/// An authenticated portal session.
///
/// Holds the opaque session cookie issued at login; it lives for one
/// workflow run and is never persisted. The [`Debug`] impl redacts
/// the cookie value.
#[derive(Clone)]
pub(crate) struct Session {
    cookie: String,
}

impl Session {
    /// The `Cookie` header value for subsequent requests.
    pub(crate) fn cookie(&self) -> &str {
        &self.cookie
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("cookie", &"[REDACTED]")
            .finish()
    }
}

/// Log in to the portal and extract the session cookie.
///
/// A structured error payload means the credentials were rejected.
/// A transport failure or unparsable body is classified as a
/// configuration problem: the host is wrong or unreachable. A success
/// body without a `Set-Cookie` header is a protocol error. A single
/// failed attempt fails the whole workflow; there are no retries.
pub(crate) async fn authenticate(
    client: &StoreClient,
    config: &PortalConfig,
) -> StoreResult<Session> {
    let response = client
        .login(&config.user, &config.password)
        .await
        .map_err(|e| {
            StoreError::Config(format!(
                "portal unreachable at {}; check host, user, and password: {e}",
                config.host
            ))
        })?;

    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(cookie_value);

    let body = response
        .text()
        .await
        .map_err(|e| StoreError::Config(format!("portal login response unreadable: {e}")))?;
    let status: StatusResponse = serde_json::from_str(&body)
        .map_err(|e| StoreError::Config(format!("portal login response unparsable: {e}")))?;

    if status.error {
        return Err(StoreError::Auth(
            status
                .message
                .unwrap_or_else(|| "login rejected".to_string()),
        ));
    }

    match cookie {
        Some(cookie) => {
            debug!("portal session established for {}", config.user);
            Ok(Session { cookie })
        }
        None => Err(StoreError::Protocol(
            "login succeeded but no session cookie was set".to_string(),
        )),
    }
}

/// Reduce a `Set-Cookie` header to the bare `name=value` pair.
fn cookie_value(raw: &str) -> String {
    raw.split(';').next().unwrap_or(raw).trim().to_string()
}
