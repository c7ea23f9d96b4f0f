//! Shared mock-portal helpers for integration tests.

use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wso2_store_client::PortalConfig;

pub const LOGIN_PATH: &str = "/store/site/blocks/user/login/ajax/login.jag";
pub const SEARCH_PATH: &str = "/store/site/blocks/search/api-search/ajax/search.jag";
pub const APPLICATION_LIST_PATH: &str =
    "/store/site/blocks/application/application-list/ajax/application-list.jag";
pub const APPLICATION_ADD_PATH: &str =
    "/store/site/blocks/application/application-add/ajax/application-add.jag";
pub const SUBSCRIPTION_ADD_PATH: &str =
    "/store/site/blocks/subscription/subscription-add/ajax/subscription-add.jag";
pub const SUBSCRIPTION_LIST_PATH: &str =
    "/store/site/blocks/subscription/subscription-list/ajax/subscription-list.jag";

pub const SESSION_COOKIE: &str = "JSESSIONID=mock-session";

/// Config pointing at a mock portal.
pub fn portal_config(server: &MockServer) -> PortalConfig {
    PortalConfig::new(server.uri(), "u", "p").unwrap()
}

/// Login succeeds and sets the session cookie.
pub async fn mount_login_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(body_string_contains("action=login"))
        .and(body_string_contains("username=u"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "Set-Cookie",
                    format!("{SESSION_COOKIE}; Path=/store; HttpOnly").as_str(),
                )
                .set_body_json(json!({ "error": false })),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// A search for `api_name` returns the given candidate records.
pub async fn mount_search(server: &MockServer, api_name: &str, result: Value, expect: u64) {
    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .and(body_string_contains("action=searchAPIs"))
        .and(body_string_contains(format!("query={api_name}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "error": false, "result": result })),
        )
        .expect(expect)
        .mount(server)
        .await;
}

/// A catalog record for an API owned by `admin`.
pub fn api_record(name: &str) -> Value {
    json!({ "name": name, "provider": "admin", "version": "1.0" })
}

/// The application listing contains the given names.
pub async fn mount_application_list(server: &MockServer, names: &[&str]) {
    let applications: Vec<Value> = names.iter().map(|name| json!({ "name": name })).collect();
    Mock::given(method("GET"))
        .and(path(APPLICATION_LIST_PATH))
        .and(query_param("action", "getApplications"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "error": false, "applications": applications })),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// Application creation succeeds.
pub async fn mount_application_add(server: &MockServer, expect: u64) {
    Mock::given(method("POST"))
        .and(path(APPLICATION_ADD_PATH))
        .and(body_string_contains("action=addApplication"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": false })))
        .expect(expect)
        .mount(server)
        .await;
}

/// Key generation returns the given pair.
pub async fn mount_generate_keys(server: &MockServer, key: &str, secret: &str, expect: u64) {
    Mock::given(method("POST"))
        .and(path(SUBSCRIPTION_ADD_PATH))
        .and(body_string_contains("action=generateApplicationKey"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": false,
            "data": { "key": { "consumerKey": key, "consumerSecret": secret } }
        })))
        .expect(expect)
        .mount(server)
        .await;
}

/// The subscription listing carries the given application records.
pub async fn mount_subscription_list(server: &MockServer, applications: Value) {
    Mock::given(method("GET"))
        .and(path(SUBSCRIPTION_LIST_PATH))
        .and(query_param("action", "getAllSubscriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": false,
            "subscriptions": { "applications": applications }
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Subscribing to `api_name` answers with the given body.
pub async fn mount_subscribe(server: &MockServer, api_name: &str, body: Value, expect: u64) {
    Mock::given(method("POST"))
        .and(path(SUBSCRIPTION_ADD_PATH))
        .and(body_string_contains("action=addSubscription"))
        .and(body_string_contains(format!("name={api_name}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expect)
        .mount(server)
        .await;
}
