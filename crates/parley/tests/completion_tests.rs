//! End-to-end tests against a mock OpenAI-compatible API
//!
//! Runs the real completion client behind the router, with wiremock
//! standing in for the external service.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use parley::config::{RephraseConfig, ServerConfig};
use parley::conversation::{ConversationStore, InMemoryConversationStore};
use parley::rephrase::{Category, OpenAiCompletionClient, Rephraser};
use parley::server::{AppState, create_router};

fn rephrase_config(api_url: String) -> RephraseConfig {
    RephraseConfig {
        api_url,
        timeout_secs: 5,
        ..RephraseConfig::default()
    }
}

fn app_for(mock_server: &MockServer) -> axum::Router {
    let client = OpenAiCompletionClient::with_api_key(
        &rephrase_config(mock_server.uri()),
        "test-key".to_string(),
    )
    .unwrap();

    let state = Arc::new(AppState {
        rephraser: Arc::new(Rephraser::new(Arc::new(client))),
        store: Arc::new(InMemoryConversationStore::new()),
        reload: None,
        allow_freeform_prompts: true,
    });

    create_router(state, &ServerConfig::default()).unwrap()
}

async fn send(app: &axum::Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/send-message")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_positive_example_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4",
            "temperature": 0.7,
            "messages": [
                {"role": "system", "content": Category::Positive.instruction()},
                {"role": "user", "content": "this is bad"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{
                "message": {"content": "\nI think there's room to make this even better!\n"}
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = app_for(&mock_server);

    let (status, json) = send(
        &app,
        serde_json::json!({
            "sender": "u1",
            "recipient": "u2",
            "message": "this is bad",
            "category": "positive"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["phrasedMessage"],
        "I think there's room to make this even better!"
    );
    assert_eq!(json["category"], "positive");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/conversation?user1=u2&user2=u1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let log: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(log.as_array().unwrap().len(), 1);
    assert_eq!(log[0]["originalMessage"], "this is bad");
}

#[tokio::test]
async fn test_quota_error_falls_back_to_original() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": {"message": "You exceeded your current quota", "type": "insufficient_quota"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = app_for(&mock_server);

    let (status, json) = send(
        &app,
        serde_json::json!({"sender": "u1", "recipient": "u2", "message": "this is bad"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["phrasedMessage"], "this is bad");
}

#[tokio::test]
async fn test_malformed_completion_falls_back_to_original() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&mock_server)
        .await;

    let app = app_for(&mock_server);

    let (status, json) = send(
        &app,
        serde_json::json!({"sender": "u1", "recipient": "u2", "message": "keep me"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "keep me");
}

#[tokio::test]
async fn test_freeform_prompt_sent_as_system_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({
            "messages": [
                {"role": "system", "content": "Rewrite formally."},
                {"role": "user", "content": "gimme the report"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"content": "Could you please send me the report?"}}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = app_for(&mock_server);

    let (status, json) = send(
        &app,
        serde_json::json!({
            "sender": "u1",
            "recipient": "u2",
            "message": "gimme the report",
            "categoryPrompt": "Rewrite formally."
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Could you please send me the report?");
    assert_eq!(json["categoryPrompt"], "Rewrite formally.");
}

#[tokio::test]
async fn test_slow_completion_still_delivers_original() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "choices": [{"message": {"content": "Too late to matter."}}]
                }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let client = OpenAiCompletionClient::with_api_key(
        &RephraseConfig {
            api_url: mock_server.uri(),
            timeout_secs: 10,
            ..RephraseConfig::default()
        },
        "test-key".to_string(),
    )
    .unwrap();

    let rephraser = Rephraser::new(Arc::new(client)).with_timeout(Duration::from_secs(1));
    let store = Arc::new(InMemoryConversationStore::new());
    let state = Arc::new(AppState {
        rephraser: Arc::new(rephraser),
        store: store.clone(),
        reload: None,
        allow_freeform_prompts: true,
    });
    let server = ServerConfig {
        request_timeout_secs: 2,
        ..ServerConfig::default()
    };
    let app = create_router(state, &server).unwrap();

    let (status, json) = send(
        &app,
        serde_json::json!({"sender": "u1", "recipient": "u2", "message": "this is bad"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["phrasedMessage"], "this is bad");
    assert_eq!(store.conversation("u1", "u2").await.unwrap().len(), 1);
}
