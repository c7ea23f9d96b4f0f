//! Provisioning client for the WSO2 API Manager Store.
//!
//! Provisions an API-consumer application on a store portal:
//! authenticates, verifies that every required API exists, ensures
//! the application exists (creating it if absent), issues or recovers
//! OAuth2 consumer credentials, and subscribes the application to
//! each API. The output is a single consumer key/secret pair.
//!
//! Re-running against a portal that already has the application and
//! its subscriptions in place succeeds and returns the existing
//! credentials.
//!
//! ```rust,no_run
//! use wso2_store_client::{ApiDependency, ApplicationSpec, PortalConfig, StoreProvisioner};
//!
//! # async fn run() -> wso2_store_client::StoreResult<()> {
//! let config = PortalConfig::new("https://apim.example.com:9443", "admin", "admin")?;
//! let spec = ApplicationSpec::new("App1", vec![ApiDependency::new("Weather", "1.0")]);
//!
//! let provisioner = StoreProvisioner::new(config)?;
//! let credential = provisioner.provision(&spec).await?;
//! println!("consumer key: {}", credential.consumer_key);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod progress;
pub mod workflow;

mod application;
mod catalog;
mod client;
mod keys;
mod session;
mod subscription;

pub use config::PortalConfig;
pub use error::{StoreError, StoreResult};
pub use models::{ApiDependency, ApplicationSpec, Credential};
pub use workflow::StoreProvisioner;
