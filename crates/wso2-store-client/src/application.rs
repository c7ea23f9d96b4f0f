//! Application existence check and creation.

use crate::client::{envelope_err, StoreClient};
use crate::error::{StoreError, StoreResult};
use crate::models::ApplicationSpec;
use crate::session::Session;
use tracing::{debug, info};

/// Ensure the spec's application exists on the portal.
///
/// Returns `true` when the application had to be created, `false`
/// when it was already present (in which case no create request is
/// issued). The portal always has at least its default application,
/// so an empty listing means the host is not an API store and is
/// fatal.
pub(crate) async fn ensure_exists(
    client: &StoreClient,
    session: &Session,
    spec: &ApplicationSpec,
) -> StoreResult<bool> {
    let listing = client.list_applications(session).await?;
    if listing.error {
        return Err(envelope_err(listing.message, "application listing"));
    }
    if listing.applications.is_empty() {
        return Err(StoreError::Protocol(
            "portal listed no applications at all; is this an API store host?".to_string(),
        ));
    }

    if listing.applications.iter().any(|app| app.name == spec.name) {
        debug!(application = %spec.name, "application already exists");
        return Ok(false);
    }

    let status = client.add_application(session, spec).await?;
    if status.error {
        return Err(envelope_err(status.message, "application creation"));
    }

    info!(application = %spec.name, "application created");
    Ok(true)
}
