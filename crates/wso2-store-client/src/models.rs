//! Spec types supplied by the caller and wire types returned by the
//! portal.
//!
//! Portal responses are JSON envelopes: an optional `error` flag with
//! a `message` alongside the payload. Field names follow the portal's
//! camelCase wire format.

use serde::{Deserialize, Serialize};

/// Throttling tier applied when a spec leaves one unset.
pub const DEFAULT_TIER: &str = "Unlimited";

/// One API the application depends on.
///
/// Order within [`ApplicationSpec::dependencies`] determines both
/// catalog-resolution and subscription order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDependency {
    pub api_name: String,
    pub api_version: String,
    /// Subscription tier; [`DEFAULT_TIER`] when unset.
    #[serde(default)]
    pub tier: Option<String>,
}

impl ApiDependency {
    pub fn new(api_name: impl Into<String>, api_version: impl Into<String>) -> Self {
        Self {
            api_name: api_name.into(),
            api_version: api_version.into(),
            tier: None,
        }
    }

    /// The tier to subscribe with.
    #[must_use]
    pub fn tier(&self) -> &str {
        self.tier.as_deref().unwrap_or(DEFAULT_TIER)
    }
}

/// Caller-supplied description of the application to provision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSpec {
    pub name: String,
    #[serde(default)]
    pub dependencies: Vec<ApiDependency>,
    /// Token tier used when creating the application.
    #[serde(default)]
    pub token_tier: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub oauth2_callback_url: Option<String>,
}

impl ApplicationSpec {
    pub fn new(name: impl Into<String>, dependencies: Vec<ApiDependency>) -> Self {
        Self {
            name: name.into(),
            dependencies,
            token_tier: None,
            description: None,
            oauth2_callback_url: None,
        }
    }

    #[must_use]
    pub fn token_tier(&self) -> &str {
        self.token_tier.as_deref().unwrap_or(DEFAULT_TIER)
    }

    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn callback_url(&self) -> &str {
        self.oauth2_callback_url.as_deref().unwrap_or("")
    }
}

/// An API record resolved from the portal search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCatalogEntry {
    pub name: String,
    pub provider: String,
}

/// An application row from the subscription listing.
///
/// `id` is the portal-internal identifier required by subscribe
/// requests; the `prod*` fields carry previously issued credentials,
/// absent until keys have been generated.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub prod_consumer_key: Option<String>,
    #[serde(default)]
    pub prod_consumer_secret: Option<String>,
}

/// The workflow output: an OAuth2 consumer key/secret pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub consumer_key: String,
    pub consumer_secret: String,
}

// ── Wire envelopes ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct StatusResponse {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Vec<ApiCatalogEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApplicationListResponse {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub applications: Vec<ApplicationSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApplicationSummary {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KeyResponse {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<KeyData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KeyData {
    pub key: GeneratedKey,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeneratedKey {
    pub consumer_key: String,
    pub consumer_secret: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubscriptionListResponse {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub subscriptions: Option<SubscriptionBlock>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubscriptionBlock {
    #[serde(default)]
    pub applications: Vec<ApplicationRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_tier_defaults_to_unlimited() {
        let dep = ApiDependency::new("Weather", "1.0");
        assert_eq!(dep.tier(), "Unlimited");

        let dep = ApiDependency {
            tier: Some("Gold".to_string()),
            ..ApiDependency::new("Weather", "1.0")
        };
        assert_eq!(dep.tier(), "Gold");
    }

    #[test]
    fn spec_defaults_applied() {
        let spec = ApplicationSpec::new("App1", vec![]);
        assert_eq!(spec.token_tier(), "Unlimited");
        assert_eq!(spec.description(), "");
        assert_eq!(spec.callback_url(), "");
    }

    #[test]
    fn spec_parses_camel_case_json() {
        let spec: ApplicationSpec = serde_json::from_str(
            r#"{
                "name": "App1",
                "dependencies": [{"apiName": "Weather", "apiVersion": "1.0"}],
                "oauth2CallbackUrl": "https://app.example.com/cb"
            }"#,
        )
        .unwrap();
        assert_eq!(spec.name, "App1");
        assert_eq!(spec.dependencies.len(), 1);
        assert_eq!(spec.dependencies[0].api_name, "Weather");
        assert_eq!(spec.callback_url(), "https://app.example.com/cb");
    }

    #[test]
    fn subscription_listing_parses_key_fields() {
        let listing: SubscriptionListResponse = serde_json::from_str(
            r#"{
                "error": false,
                "subscriptions": {
                    "applications": [{
                        "id": 7,
                        "name": "App1",
                        "prodConsumerKey": "ck",
                        "prodConsumerSecret": "cs"
                    }]
                }
            }"#,
        )
        .unwrap();
        let apps = listing.subscriptions.unwrap().applications;
        assert_eq!(apps[0].id, 7);
        assert_eq!(apps[0].prod_consumer_key.as_deref(), Some("ck"));
    }

    #[test]
    fn envelope_error_flag_defaults_to_false() {
        let status: StatusResponse = serde_json::from_str("{}").unwrap();
        assert!(!status.error);
        assert!(status.message.is_none());
    }
}
