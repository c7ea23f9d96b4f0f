//! OAuth2 key generation for freshly created applications.

use crate::client::StoreClient;
use crate::error::{StoreError, StoreResult};
use crate::models::{ApplicationSpec, Credential};
use crate::session::Session;
use tracing::info;

/// Request production-type keys for the application.
///
/// Only called for applications this run created; pre-existing
/// applications keep the keys recovered from the subscription
/// listing.
pub(crate) async fn issue_keys(
    client: &StoreClient,
    session: &Session,
    spec: &ApplicationSpec,
) -> StoreResult<Credential> {
    let response = client.generate_keys(session, spec).await?;
    if response.error {
        let message = response.message.unwrap_or_else(|| "no message".to_string());
        return Err(StoreError::Remote(format!(
            "key generation for application \"{}\" failed: {message}",
            spec.name
        )));
    }

    let key = response
        .data
        .ok_or_else(|| {
            StoreError::Protocol("key generation response carried no key data".to_string())
        })?
        .key;

    info!(application = %spec.name, "production keys generated");
    Ok(Credential {
        consumer_key: key.consumer_key,
        consumer_secret: key.consumer_secret,
    })
}
