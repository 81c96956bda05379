mod common;

use axum_test::TestServer;
use httpmock::Method::POST;
use httpmock::MockServer;
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn test_submit_urls_preserves_order_and_isolates_failures() {
    let token = MockServer::start_async().await;
    let indexing = MockServer::start_async().await;
    let token_mock = common::mock_token_success(&token).await;
    common::mock_publish(&indexing, "https://example.com/a", "URL_UPDATED", 200, "{}").await;
    common::mock_publish(
        &indexing,
        "https://example.com/b",
        "URL_UPDATED",
        404,
        r#"{"error":{"code":404,"message":"Requested entity was not found."}}"#,
    )
    .await;
    common::mock_publish(&indexing, "https://example.com/c", "URL_DELETED", 200, "{}").await;

    let state = common::create_test_state(&common::test_config(&indexing));
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server
        .post("/submit-urls")
        .json(&json!([
            {
                "url": "https://example.com/a",
                "service_account": common::service_account_json(&token)
            },
            { "url": "https://example.com/b" },
            { "url": "https://example.com/c", "type": "URL_DELETED" }
        ]))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let results = json.as_array().unwrap();
    assert_eq!(results.len(), 3);

    assert_eq!(results[0]["url"], "https://example.com/a");
    assert_eq!(results[0]["success"], true);
    assert_eq!(results[0]["status_code"], 200);

    assert_eq!(results[1]["url"], "https://example.com/b");
    assert_eq!(results[1]["success"], false);
    assert_eq!(results[1]["status_code"], 404);
    assert!(
        results[1]["message"]
            .as_str()
            .unwrap()
            .contains("Requested entity was not found.")
    );

    assert_eq!(results[2]["url"], "https://example.com/c");
    assert_eq!(results[2]["type"], "URL_DELETED");
    assert_eq!(results[2]["success"], true);

    // One token for the whole batch.
    token_mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_submit_urls_empty_batch() {
    let indexing = MockServer::start_async().await;
    let state = common::create_test_state(&common::test_config(&indexing));
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server.post("/submit-urls").json(&json!([])).await;

    response.assert_status_ok();
    response.assert_json(&json!([]));
}

#[tokio::test]
async fn test_submit_urls_token_failure_fails_whole_batch() {
    let token = MockServer::start_async().await;
    let indexing = MockServer::start_async().await;
    common::mock_token_error(&token, "invalid_grant", "Invalid JWT Signature.").await;

    let state = common::create_test_state(&common::test_config(&indexing));
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server
        .post("/submit-urls")
        .json(&json!([
            {
                "url": "https://example.com/a",
                "service_account": common::service_account_json(&token)
            },
            { "url": "https://example.com/b" }
        ]))
        .await;

    response.assert_status_internal_server_error();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "token_acquisition_failed"
    );
}

#[tokio::test]
async fn test_submit_urls_invalid_item_rejects_batch() {
    let indexing = MockServer::start_async().await;
    let state = common::create_test_state(&common::test_config(&indexing));
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server
        .post("/submit-urls")
        .json(&json!([
            { "url": "https://example.com/a" },
            { "url": "definitely not a url" }
        ]))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_submit_urls_without_credentials() {
    let indexing = MockServer::start_async().await;
    let state = common::create_test_state(&common::test_config(&indexing));
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server
        .post("/submit-urls")
        .json(&json!([{ "url": "https://example.com/a" }]))
        .await;

    response.assert_status_internal_server_error();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "credential_not_found"
    );
}

#[tokio::test]
async fn test_submit_urls_publish_timeout_is_per_item() {
    let token = MockServer::start_async().await;
    let indexing = MockServer::start_async().await;
    common::mock_token_success(&token).await;
    common::mock_publish(&indexing, "https://example.com/fast", "URL_UPDATED", 200, "{}").await;
    indexing
        .mock_async(|when, then| {
            when.method(POST)
                .path(common::PUBLISH_PATH)
                .json_body(json!({ "url": "https://example.com/slow", "type": "URL_UPDATED" }));
            then.status(200).delay(Duration::from_secs(3)).body("{}");
        })
        .await;

    let mut config = common::test_config(&indexing);
    config.request_timeout_secs = 1;
    let state = common::create_test_state(&config);
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server
        .post("/submit-urls")
        .json(&json!([
            {
                "url": "https://example.com/slow",
                "service_account": common::service_account_json(&token)
            },
            { "url": "https://example.com/fast" }
        ]))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let results = json.as_array().unwrap();
    assert_eq!(results.len(), 2);

    assert_eq!(results[0]["url"], "https://example.com/slow");
    assert_eq!(results[0]["success"], false);
    assert_eq!(results[0]["status_code"], 500);
    assert!(results[0]["message"].as_str().unwrap().contains("timed out"));

    assert_eq!(results[1]["url"], "https://example.com/fast");
    assert_eq!(results[1]["success"], true);
}
