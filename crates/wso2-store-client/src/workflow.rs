//! The provisioning workflow: a strictly sequential pipeline.
//!
//! Stages run in a fixed order, each awaiting the previous network
//! call: authenticate, resolve the API catalog, settle application
//! existence, issue keys for fresh applications, recover the
//! application record, subscribe to each dependency. The first
//! failure short-circuits the rest and becomes the run's single
//! result. Runs share nothing; several may provision different
//! applications concurrently, each with its own session.

use crate::client::StoreClient;
use crate::config::PortalConfig;
use crate::error::{StoreError, StoreResult};
use crate::models::{ApplicationSpec, Credential};
use crate::progress::ProgressLog;
use crate::{application, catalog, keys, session, subscription};
use std::collections::HashSet;
use tracing::{debug, info};

/// Provisions API-consumer applications against one portal.
pub struct StoreProvisioner {
    config: PortalConfig,
    client: StoreClient,
    progress: Option<ProgressLog>,
}

impl StoreProvisioner {
    /// Build a provisioner from a validated portal config.
    pub fn new(config: PortalConfig) -> StoreResult<Self> {
        let client = StoreClient::new(&config)?;
        let progress = config
            .debug
            .then(|| ProgressLog::new(config.log_file.clone()));
        Ok(Self {
            config,
            client,
            progress,
        })
    }

    /// Run the full pipeline for one application spec.
    ///
    /// Safe to re-run: an application that already exists is left
    /// untouched, its keys are recovered from the subscription
    /// listing, and subscriptions the portal already has are treated
    /// as success. Newly issued keys take precedence over recovered
    /// ones.
    pub async fn provision(&self, spec: &ApplicationSpec) -> StoreResult<Credential> {
        validate_spec(spec)?;

        if let Some(log) = &self.progress {
            log.run_separator();
        }

        self.note("authenticating to the portal");
        let session = session::authenticate(&self.client, &self.config).await?;

        let catalog = catalog::resolve(
            &self.client,
            &session,
            &spec.dependencies,
            self.progress.as_ref(),
        )
        .await?;

        self.note(&format!(
            "checking whether application \"{}\" exists",
            spec.name
        ));
        let created = application::ensure_exists(&self.client, &session, spec).await?;

        let issued = if created {
            self.note(&format!(
                "generating keys for application \"{}\"",
                spec.name
            ));
            Some(keys::issue_keys(&self.client, &session, spec).await?)
        } else {
            None
        };

        self.note(&format!(
            "recovering the record for application \"{}\"",
            spec.name
        ));
        let record = subscription::find_application(&self.client, &session, spec).await?;

        let credential = match issued {
            Some(credential) => credential,
            None => match (&record.prod_consumer_key, &record.prod_consumer_secret) {
                (Some(key), Some(secret)) => Credential {
                    consumer_key: key.clone(),
                    consumer_secret: secret.clone(),
                },
                _ => {
                    return Err(StoreError::Protocol(format!(
                        "application \"{}\" exists but has no production keys",
                        spec.name
                    )))
                }
            },
        };

        subscription::subscribe_all(
            &self.client,
            &session,
            spec,
            &record,
            &catalog,
            self.progress.as_ref(),
        )
        .await?;

        info!(
            application = %spec.name,
            dependencies = spec.dependencies.len(),
            created,
            "provisioning complete"
        );
        Ok(credential)
    }

    fn note(&self, line: &str) {
        debug!("{line}");
        if let Some(log) = &self.progress {
            log.note(line);
        }
    }
}

fn validate_spec(spec: &ApplicationSpec) -> StoreResult<()> {
    if spec.name.trim().is_empty() {
        return Err(StoreError::Config(
            "application name is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for dep in &spec.dependencies {
        if !seen.insert(dep.api_name.as_str()) {
            return Err(StoreError::Config(format!(
                "dependency \"{}\" listed more than once",
                dep.api_name
            )));
        }
    }

    Ok(())
}
