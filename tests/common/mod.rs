#![allow(dead_code)]

use axum::ServiceExt;
use axum::extract::Request;
use axum::routing::IntoMakeService;
use httpmock::Method::POST;
use httpmock::{Mock, MockServer};
use indexing_relay::config::Config;
use indexing_relay::infrastructure::google::oauth::JWT_BEARER_GRANT;
use indexing_relay::routes::app_router;
use indexing_relay::state::AppState;
use serde_json::{Value, json};
use std::path::PathBuf;
use tower_http::normalize_path::NormalizePath;

pub const TEST_PRIVATE_KEY: &str = include_str!("../fixtures/test_private_key.pem");

pub const TOKEN_PATH: &str = "/token";
pub const PUBLISH_PATH: &str = "/v3/urlNotifications:publish";
pub const ACCESS_TOKEN: &str = "ya29.test-access-token";

/// Service-account JSON whose `token_uri` points at `token_server`.
///
/// The private key is stored with escaped newlines, as it is when the JSON
/// travels through environment variables.
pub fn service_account_json(token_server: &MockServer) -> Value {
    json!({
        "type": "service_account",
        "project_id": "demo-project",
        "private_key_id": "test-key-1",
        "private_key": TEST_PRIVATE_KEY.trim_end().replace('\n', "\\n"),
        "client_email": "indexer@demo-project.iam.gserviceaccount.com",
        "client_id": "1234567890",
        "auth_uri": "https://accounts.google.com/o/oauth2/auth",
        "token_uri": token_server.url(TOKEN_PATH),
    })
}

/// Configuration pointing at the mock Indexing API with no ambient credentials.
pub fn test_config(indexing_server: &MockServer) -> Config {
    Config {
        service_account_base64: None,
        service_account_file: PathBuf::from("/nonexistent/indexing-relay/service-account.json"),
        indexing_endpoint: indexing_server.url(PUBLISH_PATH),
        request_timeout_secs: 5,
        token_retry_delay_ms: 10,
        ..Config::default()
    }
}

pub fn create_test_state(config: &Config) -> AppState {
    AppState::from_config(config).unwrap()
}

/// The production router, trace layer and path normalization included.
pub fn test_router(state: AppState) -> IntoMakeService<NormalizePath<axum::Router>> {
    ServiceExt::<Request>::into_make_service(app_router(state))
}

/// Token endpoint that accepts any JWT-bearer assertion.
pub async fn mock_token_success(token_server: &MockServer) -> Mock<'_> {
    token_server
        .mock_async(|when, then| {
            when.method(POST)
                .path(TOKEN_PATH)
                .form_urlencoded_tuple("grant_type", JWT_BEARER_GRANT)
                .form_urlencoded_tuple_exists("assertion");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "access_token": ACCESS_TOKEN,
                    "expires_in": 3599,
                    "token_type": "Bearer"
                }));
        })
        .await
}

/// Token endpoint that rejects every assertion with the given OAuth error.
pub async fn mock_token_error<'a>(
    token_server: &'a MockServer,
    error: &str,
    description: &str,
) -> Mock<'a> {
    let body = json!({ "error": error, "error_description": description });
    token_server
        .mock_async(move |when, then| {
            when.method(POST).path(TOKEN_PATH);
            then.status(400)
                .header("Content-Type", "application/json")
                .json_body(body);
        })
        .await
}

/// Publish endpoint answering `status` with `body` for one notification.
pub async fn mock_publish<'a>(
    indexing_server: &'a MockServer,
    url: &str,
    change_type: &str,
    status: u16,
    body: &str,
) -> Mock<'a> {
    let expected = json!({ "url": url, "type": change_type });
    let body = body.to_string();
    indexing_server
        .mock_async(move |when, then| {
            when.method(POST)
                .path(PUBLISH_PATH)
                .header("authorization", format!("Bearer {ACCESS_TOKEN}"))
                .header("content-type", "application/json")
                .json_body(expected);
            then.status(status).body(body);
        })
        .await
}
