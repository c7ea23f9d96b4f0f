//! Low-level HTTP access to the store portal (reqwest-based).
//!
//! `StoreClient` owns the base URL and the underlying `reqwest`
//! client and exposes one thin method per portal endpoint. Response
//! interpretation beyond envelope decoding (name matching, duplicate
//! tolerance, credential precedence) lives in the stage modules.

use crate::config::PortalConfig;
use crate::error::{StoreError, StoreResult};
use crate::models::{
    ApplicationListResponse, ApplicationSpec, KeyResponse, SearchResponse, StatusResponse,
    SubscriptionListResponse,
};
use crate::session::Session;
use reqwest::header::COOKIE;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub(crate) const LOGIN_PATH: &str = "/store/site/blocks/user/login/ajax/login.jag";
pub(crate) const SEARCH_PATH: &str = "/store/site/blocks/search/api-search/ajax/search.jag";
pub(crate) const APPLICATION_LIST_PATH: &str =
    "/store/site/blocks/application/application-list/ajax/application-list.jag";
pub(crate) const APPLICATION_ADD_PATH: &str =
    "/store/site/blocks/application/application-add/ajax/application-add.jag";
// Key generation and subscription share one endpoint, switched by the
// `action` form field.
pub(crate) const SUBSCRIPTION_ADD_PATH: &str =
    "/store/site/blocks/subscription/subscription-add/ajax/subscription-add.jag";
pub(crate) const SUBSCRIPTION_LIST_PATH: &str =
    "/store/site/blocks/subscription/subscription-list/ajax/subscription-list.jag";

/// HTTP client bound to one portal host.
#[derive(Debug, Clone)]
pub(crate) struct StoreClient {
    base_url: String,
    http: Client,
}

impl StoreClient {
    /// Build a client from the portal config.
    ///
    /// Certificate validation is on unless the config explicitly opts
    /// out for lab portals.
    pub(crate) fn new(config: &PortalConfig) -> StoreResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .user_agent("wso2-store-client/0.1")
            .build()
            .map_err(|e| StoreError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.host.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Submit the login form. Returns the raw response; the session
    /// stage owns cookie extraction and error classification.
    pub(crate) async fn login(&self, user: &str, password: &str) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, LOGIN_PATH);
        debug!("store POST {}", url);
        self.http
            .post(&url)
            .form(&[
                ("action", "login"),
                ("username", user),
                ("password", password),
                ("tenant", "null"),
            ])
            .send()
            .await
    }

    /// Search the API catalog by name.
    pub(crate) async fn search_apis(
        &self,
        session: &Session,
        query: &str,
    ) -> StoreResult<SearchResponse> {
        self.post_form(
            SEARCH_PATH,
            session,
            &[
                ("action", "searchAPIs"),
                ("query", query),
                ("start", "0"),
                ("end", "100"),
            ],
        )
        .await
    }

    /// List every application visible to the session.
    pub(crate) async fn list_applications(
        &self,
        session: &Session,
    ) -> StoreResult<ApplicationListResponse> {
        self.get(
            &format!("{APPLICATION_LIST_PATH}?action=getApplications"),
            session,
        )
        .await
    }

    /// Create an application with the spec's tier, description, and
    /// callback URL.
    pub(crate) async fn add_application(
        &self,
        session: &Session,
        spec: &ApplicationSpec,
    ) -> StoreResult<StatusResponse> {
        self.post_form(
            APPLICATION_ADD_PATH,
            session,
            &[
                ("action", "addApplication"),
                ("application", &spec.name),
                ("tier", spec.token_tier()),
                ("description", spec.description()),
                ("callbackUrl", spec.callback_url()),
            ],
        )
        .await
    }

    /// Generate production-type OAuth2 keys for an application.
    pub(crate) async fn generate_keys(
        &self,
        session: &Session,
        spec: &ApplicationSpec,
    ) -> StoreResult<KeyResponse> {
        self.post_form(
            SUBSCRIPTION_ADD_PATH,
            session,
            &[
                ("action", "generateApplicationKey"),
                ("application", &spec.name),
                ("keytype", "PRODUCTION"),
                ("callbackUrl", spec.callback_url()),
                ("authorizedDomains", "ALL"),
                ("validityTime", "360000"),
            ],
        )
        .await
    }

    /// List all subscriptions, which also carries the application
    /// records with their internal ids and issued keys.
    pub(crate) async fn list_subscriptions(
        &self,
        session: &Session,
    ) -> StoreResult<SubscriptionListResponse> {
        self.get(
            &format!("{SUBSCRIPTION_LIST_PATH}?action=getAllSubscriptions"),
            session,
        )
        .await
    }

    /// Subscribe an application to one API.
    #[allow(clippy::too_many_arguments)]
    pub(crate) async fn add_subscription(
        &self,
        session: &Session,
        api_name: &str,
        api_version: &str,
        provider: &str,
        tier: &str,
        application_id: i64,
    ) -> StoreResult<StatusResponse> {
        self.post_form(
            SUBSCRIPTION_ADD_PATH,
            session,
            &[
                ("action", "addSubscription"),
                ("name", api_name),
                ("version", api_version),
                ("provider", provider),
                ("tier", tier),
                ("applicationId", &application_id.to_string()),
            ],
        )
        .await
    }

    // ── Request plumbing ─────────────────────────────────────────────

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        session: &Session,
        form: &[(&str, &str)],
    ) -> StoreResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("store POST {}", url);
        let response = self
            .http
            .post(&url)
            .header(COOKIE, session.cookie())
            .form(form)
            .send()
            .await?;
        Self::parse_body(response).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path_and_query: &str,
        session: &Session,
    ) -> StoreResult<T> {
        let url = format!("{}{}", self.base_url, path_and_query);
        debug!("store GET {}", url);
        let response = self
            .http
            .get(&url)
            .header(COOKIE, session.cookie())
            .send()
            .await?;
        Self::parse_body(response).await
    }

    async fn parse_body<T: DeserializeOwned>(response: Response) -> StoreResult<T> {
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| StoreError::Protocol(format!("unparsable portal response: {e}")))
    }
}

/// Surface an envelope-level failure as a portal error, embedding the
/// remote message verbatim.
pub(crate) fn envelope_err(message: Option<String>, action: &str) -> StoreError {
    match message {
        Some(message) => StoreError::Remote(message),
        None => StoreError::Remote(format!("{action} failed without a message")),
    }
}
