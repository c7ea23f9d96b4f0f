//! Resolution of spec dependencies against the portal API catalog.

use crate::client::{envelope_err, StoreClient};
use crate::error::{StoreError, StoreResult};
use crate::models::{ApiCatalogEntry, ApiDependency};
use crate::progress::ProgressLog;
use crate::session::Session;
use std::collections::HashMap;
use tracing::debug;

/// Resolve every dependency to exactly one catalog entry, keyed by
/// API name.
///
/// Dependencies are looked up strictly in the order supplied, one
/// search round-trip each; this ordering also determines later
/// subscription order, and a missing API fails the run before any
/// further dependency is queried. Search results are filtered by
/// exact name equality — the portal search is a substring match.
pub(crate) async fn resolve(
    client: &StoreClient,
    session: &Session,
    dependencies: &[ApiDependency],
    progress: Option<&ProgressLog>,
) -> StoreResult<HashMap<String, ApiCatalogEntry>> {
    let mut catalog = HashMap::with_capacity(dependencies.len());

    for dep in dependencies {
        if let Some(log) = progress {
            log.note(&format!("checking API \"{}\"", dep.api_name));
        }

        let response = client.search_apis(session, &dep.api_name).await?;
        if response.error {
            return Err(envelope_err(response.message, "API search"));
        }

        let entry = exact_match(response.result, &dep.api_name).ok_or_else(|| {
            StoreError::NotFound(format!("API \"{}\" not found on the portal", dep.api_name))
        })?;

        debug!(
            api = %dep.api_name,
            provider = %entry.provider,
            "dependency resolved"
        );
        catalog.insert(dep.api_name.clone(), entry);
    }

    Ok(catalog)
}

fn exact_match(candidates: Vec<ApiCatalogEntry>, name: &str) -> Option<ApiCatalogEntry> {
    candidates.into_iter().find(|entry| entry.name == name)
}
