//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: resource namespace → HTTP requests → page stream

use futures::StreamExt;
use lark_sdk::config::HttpConfig;
use lark_sdk::http::HttpClientConfig;
use lark_sdk::pagination::PageStream;
use lark_sdk::types::{JsonObject, JsonValue};
use lark_sdk::{Client, ClientConfig, Domain, Error, PageRequest, RequestOptions};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    let config = ClientConfig::new(Domain::Custom(server.uri())).with_access_token("t-test");
    Client::new(config).unwrap()
}

fn no_retry_client(server: &MockServer) -> Client {
    let config = ClientConfig::new(Domain::Custom(server.uri())).with_access_token("t-test");
    Client::builder(config)
        .http_config(
            HttpClientConfig::builder()
                .base_url(server.uri())
                .max_retries(0)
                .no_rate_limit()
                .build(),
        )
        .build()
        .unwrap()
}

fn ok(data: JsonValue) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"code": 0, "msg": "success", "data": data}))
}

async fn drain(mut stream: PageStream) -> Vec<Option<JsonObject>> {
    let mut out = Vec::new();
    while let Some(page) = stream.next().await {
        out.push(page);
    }
    out
}

fn ids(pages: &[Option<JsonObject>], field: &str) -> Vec<String> {
    pages
        .iter()
        .flatten()
        .flat_map(|page| page["items"].as_array().cloned().unwrap_or_default())
        .map(|item| item[field].as_str().unwrap_or_default().to_string())
        .collect()
}

// ============================================================================
// Paginated Listing
// ============================================================================

#[tokio::test]
async fn test_chat_list_follows_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/open-apis/im/v1/chats"))
        .and(query_param("page_size", "2"))
        .and(query_param_is_missing("page_token"))
        .respond_with(ok(json!({
            "has_more": true,
            "page_token": "p2",
            "items": [{"chat_id": "oc_1"}, {"chat_id": "oc_2"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/open-apis/im/v1/chats"))
        .and(query_param("page_size", "2"))
        .and(query_param("page_token", "p2"))
        .respond_with(ok(json!({
            "has_more": false,
            "items": [{"chat_id": "oc_3"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let pages = drain(
        client
            .im()
            .v1()
            .chat()
            .list_with_iterator(PageRequest::new().query("page_size", "2")),
    )
    .await;

    assert_eq!(pages.len(), 2);
    assert_eq!(ids(&pages, "chat_id"), vec!["oc_1", "oc_2", "oc_3"]);
}

#[tokio::test]
async fn test_next_page_token_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/open-apis/contact/v3/users/find_by_department"))
        .and(query_param("department_id", "od_1"))
        .and(query_param_is_missing("page_token"))
        .respond_with(ok(json!({
            "has_more": true,
            "next_page_token": "n2",
            "items": [{"user_id": "u1"}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/open-apis/contact/v3/users/find_by_department"))
        .and(query_param("department_id", "od_1"))
        .and(query_param("page_token", "n2"))
        .respond_with(ok(json!({"has_more": false, "items": [{"user_id": "u2"}]})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let pages = drain(
        client
            .contact()
            .v3()
            .user()
            .find_by_department_with_iterator("od_1", PageRequest::new()),
    )
    .await;

    assert_eq!(ids(&pages, "user_id"), vec!["u1", "u2"]);
}

#[tokio::test]
async fn test_chat_members_path_param() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/open-apis/im/v1/chats/oc_42/members"))
        .respond_with(ok(json!({
            "has_more": false,
            "items": [{"member_id": "ou_1"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let pages = drain(
        client
            .im()
            .chat()
            .members_with_iterator("oc_42", PageRequest::new()),
    )
    .await;

    assert_eq!(ids(&pages, "member_id"), vec!["ou_1"]);
}

#[tokio::test]
async fn test_aily_messages_across_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/open-apis/aily/v1/sessions/sess_1/messages"))
        .and(query_param_is_missing("page_token"))
        .respond_with(ok(json!({
            "has_more": true,
            "page_token": "m2",
            "messages": [{"id": "msg_1"}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/open-apis/aily/v1/sessions/sess_1/messages"))
        .and(query_param("page_token", "m2"))
        .respond_with(ok(json!({"has_more": false, "messages": [{"id": "msg_2"}]})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let pages = drain(
        client
            .aily()
            .v1()
            .message()
            .list_with_iterator("sess_1", PageRequest::new()),
    )
    .await;

    let messages: Vec<JsonValue> = pages
        .into_iter()
        .flatten()
        .flat_map(|page| page["messages"].as_array().cloned().unwrap_or_default())
        .collect();
    assert_eq!(messages, vec![json!({"id": "msg_1"}), json!({"id": "msg_2"})]);
}

#[tokio::test]
async fn test_iterator_is_lazy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/open-apis/im/v1/chats"))
        .respond_with(ok(json!({"has_more": true, "page_token": "more", "items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut stream = client.im().chat().list_with_iterator(PageRequest::new());

    let first = stream.next().await.unwrap();
    assert!(first.is_some());
    drop(stream);
}

// ============================================================================
// Failure Sentinel
// ============================================================================

#[tokio::test]
async fn test_transport_failure_yields_single_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/open-apis/im/v1/chats"))
        .and(query_param_is_missing("page_token"))
        .respond_with(ok(json!({
            "has_more": true,
            "page_token": "p2",
            "items": [{"chat_id": "oc_1"}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/open-apis/im/v1/chats"))
        .and(query_param("page_token", "p2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let client = no_retry_client(&server);
    let pages = drain(client.im().chat().list_with_iterator(PageRequest::new())).await;

    assert_eq!(pages.len(), 2);
    assert!(pages[0].is_some());
    assert!(pages[1].is_none());
}

#[tokio::test]
async fn test_missing_path_param_yields_none() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let pages = drain(client.paginate(
        lark_sdk::Method::GET,
        "/open-apis/im/v1/chats/:chat_id/members",
        PageRequest::new(),
    ).pages())
    .await;

    assert_eq!(pages, vec![None]);
}

#[tokio::test]
async fn test_missing_path_param_single_call_errors() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let result = client
        .request(
            lark_sdk::Method::GET,
            "/open-apis/im/v1/chats/:chat_id",
            RequestOptions::new(),
        )
        .await;

    assert!(matches!(result, Err(Error::UndefinedVariable { .. })));
}

// ============================================================================
// Single-page Parity
// ============================================================================

#[tokio::test]
async fn test_list_returns_first_page_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/open-apis/im/v1/chats"))
        .respond_with(ok(json!({
            "has_more": true,
            "page_token": "p2",
            "items": [{"chat_id": "oc_1"}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client.im().chat().list(PageRequest::new()).await.unwrap();
    assert!(response.is_success());
    assert_eq!(response.data["page_token"], "p2");
    assert_eq!(response.data["has_more"], true);

    let mut stream = client.im().chat().list_with_iterator(PageRequest::new());
    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first["items"], response.data["items"]);
    assert!(!first.contains_key("page_token"));
    assert!(!first.contains_key("has_more"));
}

#[tokio::test]
async fn test_api_error_code_surfaces() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/open-apis/contact/v3/users/ou_missing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 41050,
            "msg": "no user authority error"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .contact()
        .user()
        .get("ou_missing", RequestOptions::new())
        .await
        .unwrap();

    assert!(!response.is_success());
    match response.into_result() {
        Err(Error::Api { code, msg }) => {
            assert_eq!(code, 41050);
            assert_eq!(msg, "no user authority error");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

// ============================================================================
// Auth Header and Bodies
// ============================================================================

#[tokio::test]
async fn test_bearer_token_from_config() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/open-apis/im/v1/chats/oc_1"))
        .and(header("Authorization", "Bearer t-test"))
        .respond_with(ok(json!({"chat_id": "oc_1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .im()
        .chat()
        .get("oc_1", RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(response.data["chat_id"], "oc_1");
}

#[tokio::test]
async fn test_cached_token_overrides_config() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/open-apis/im/v1/chats"))
        .and(header("Authorization", "Bearer t-cached"))
        .respond_with(ok(json!({"has_more": false, "items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .set_access_token("t-cached", Some(Duration::from_secs(60)))
        .await;

    let pages = drain(client.im().chat().list_with_iterator(PageRequest::new())).await;
    assert_eq!(pages.len(), 1);
    assert!(pages[0].is_some());
}

#[tokio::test]
async fn test_explicit_authorization_header_kept() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/open-apis/aily/v1/sessions/sess_1"))
        .and(header("Authorization", "Bearer u-user"))
        .respond_with(ok(json!({"session": {"id": "sess_1"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .aily()
        .session()
        .get(
            "sess_1",
            RequestOptions::new().header("Authorization", "Bearer u-user"),
        )
        .await
        .unwrap();
    assert_eq!(response.data["session"]["id"], "sess_1");
}

#[tokio::test]
async fn test_message_create_sends_body() {
    let server = MockServer::start().await;

    let body = json!({"receive_id": "oc_1", "msg_type": "text", "content": "{\"text\":\"hi\"}"});

    Mock::given(method("POST"))
        .and(path("/open-apis/im/v1/messages"))
        .and(query_param("receive_id_type", "chat_id"))
        .and(body_json(&body))
        .respond_with(ok(json!({"message_id": "om_1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .im()
        .message()
        .create("chat_id", body.clone(), RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(response.data["message_id"], "om_1");
}

#[tokio::test]
async fn test_config_http_settings_applied() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/open-apis/aily/v1/sessions/sess_1/runs"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(Domain::Custom(server.uri())).with_http(HttpConfig {
        max_retries: 0,
        ..HttpConfig::default()
    });
    let client = Client::new(config).unwrap();

    let result = client
        .aily()
        .run()
        .list("sess_1", PageRequest::new())
        .await;
    assert!(matches!(
        result,
        Err(Error::HttpStatus { status: 503, .. })
    ));
}
