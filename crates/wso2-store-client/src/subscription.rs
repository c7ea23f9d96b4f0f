//! Application record recovery and per-API subscription.

use crate::client::{envelope_err, StoreClient};
use crate::error::{StoreError, StoreResult};
use crate::models::{ApiCatalogEntry, ApiDependency, ApplicationRecord, ApplicationSpec};
use crate::progress::ProgressLog;
use crate::session::Session;
use std::collections::HashMap;
use tracing::{debug, info};

/// Marker the portal embeds in the error message when an application
/// is already subscribed to an API.
const ALREADY_SUBSCRIBED: &str = "Subscription already exists";

/// Find the spec's application in the subscription listing.
///
/// This runs for freshly created applications too: the listing is the
/// only source of the portal-internal application id that subscribe
/// requests require, and for pre-existing applications it also
/// carries the previously issued consumer key and secret.
pub(crate) async fn find_application(
    client: &StoreClient,
    session: &Session,
    spec: &ApplicationSpec,
) -> StoreResult<ApplicationRecord> {
    let listing = client.list_subscriptions(session).await?;
    if listing.error {
        return Err(envelope_err(listing.message, "subscription listing"));
    }

    let record = listing
        .subscriptions
        .map(|block| block.applications)
        .unwrap_or_default()
        .into_iter()
        .find(|app| app.name == spec.name)
        .ok_or_else(|| {
            StoreError::NotFound(format!(
                "application \"{}\" missing from the subscription listing",
                spec.name
            ))
        })?;

    debug!(application = %record.name, id = record.id, "application record resolved");
    Ok(record)
}

/// Subscribe the application to each dependency, in spec order.
///
/// A duplicate subscription is not a failure: re-running provisioning
/// against a portal that already has the subscription in place must
/// succeed, so an error payload carrying the [`ALREADY_SUBSCRIBED`]
/// marker is treated as success and processing continues. Any other
/// error payload aborts the remaining dependencies.
pub(crate) async fn subscribe_all(
    client: &StoreClient,
    session: &Session,
    spec: &ApplicationSpec,
    record: &ApplicationRecord,
    catalog: &HashMap<String, ApiCatalogEntry>,
    progress: Option<&ProgressLog>,
) -> StoreResult<()> {
    for dep in &spec.dependencies {
        let entry = catalog.get(&dep.api_name).ok_or_else(|| {
            StoreError::Protocol(format!(
                "dependency \"{}\" was never resolved against the catalog",
                dep.api_name
            ))
        })?;

        if let Some(log) = progress {
            log.note(&format!(
                "subscribing application \"{}\" to API \"{} {}\"",
                spec.name, dep.api_name, dep.api_version
            ));
        }

        let status = client
            .add_subscription(
                session,
                &dep.api_name,
                &dep.api_version,
                &entry.provider,
                dep.tier(),
                record.id,
            )
            .await?;

        if status.error {
            let message = status.message.unwrap_or_else(|| "no message".to_string());
            if is_already_subscribed(&message) {
                debug!(
                    api = %dep.api_name,
                    version = %dep.api_version,
                    "subscription already exists, continuing"
                );
                continue;
            }
            return Err(StoreError::Remote(format!(
                "subscribing application \"{}\" to API \"{} {}\" failed: {message}",
                spec.name, dep.api_name, dep.api_version
            )));
        }

        info!(
            application = %spec.name,
            api = %dep.api_name,
            version = %dep.api_version,
            "subscribed"
        );
    }

    Ok(())
}

fn is_already_subscribed(message: &str) -> bool {
    message.contains(ALREADY_SUBSCRIBED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_marker_detected_inside_longer_messages() {
        assert!(is_already_subscribed(
            "Error occurred while executing the action addSubscription : \
             Subscription already exists for API Weather"
        ));
    }

    #[test]
    fn unrelated_messages_stay_fatal() {
        assert!(!is_already_subscribed("Tier Gold is not allowed"));
        assert!(!is_already_subscribed(""));
    }
}
