//! HttpSessionStore against a mock honeypot service.

use honeypot_core::HoneypotError;
use honeypot_core::config::ApiConfig;
use honeypot_core::session::{MessageRole, ScamStatus, SessionStore};
use honeypot_infrastructure::HttpSessionStore;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_for(server: &MockServer) -> HttpSessionStore {
    HttpSessionStore::new(&ApiConfig {
        base_url: server.uri(),
        request_timeout_secs: Some(5),
    })
    .expect("store should build")
}

#[tokio::test]
async fn list_sessions_keeps_server_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/honeypot/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a", "title": "first", "is_scam": false, "confidence": 0.1},
            {"id": "b", "title": "second", "is_scam": true, "confidence": 0.9}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let sessions = store_for(&server).list_sessions().await.unwrap();

    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].id, "a");
    assert_eq!(sessions[1].title, "second");
    assert!(sessions[1].is_scam);
}

#[tokio::test]
async fn load_session_decodes_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/honeypot/session/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "s1",
            "history": [{"role": "user", "content": "hi"}],
            "is_scam": true,
            "confidence": 0.92,
            "extracted": {"upi": ["x@upi"]}
        })))
        .mount(&server)
        .await;

    let record = store_for(&server)
        .load_session("s1")
        .await
        .unwrap()
        .expect("session should exist");

    assert_eq!(record.id, "s1");
    assert_eq!(record.history.len(), 1);
    assert_eq!(record.history[0].role, MessageRole::User);
    assert!(record.is_scam);
    assert_eq!(record.extracted.upi, Some(vec!["x@upi".to_string()]));
}

#[tokio::test]
async fn load_session_error_field_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/honeypot/session/missing"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": "Session not found"})),
        )
        .mount(&server)
        .await;

    let result = store_for(&server).load_session("missing").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn send_message_posts_null_session_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/honeypot/message"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"session_id": null, "message": "Hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reply": "hello? who is this",
            "session_id": "new-1",
            "scam_status": "ONGOING",
            "confidence": 0.05,
            "extracted": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = store_for(&server).send_message(None, "Hello").await.unwrap();

    assert_eq!(reply.session_id, "new-1");
    assert_eq!(reply.reply, "hello? who is this");
    assert_eq!(reply.scam_status, ScamStatus::Ongoing);
}

#[tokio::test]
async fn send_message_carries_existing_session_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/honeypot/message"))
        .and(body_json(json!({"session_id": "s7", "message": "pay now"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reply": "how do i pay",
            "session_id": "s7",
            "scam_status": "SCAM_CONFIRMED",
            "confidence": 0.88,
            "extracted": {"payment_requests": ["5000 INR"], "scam_type": "advance fee"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = store_for(&server)
        .send_message(Some("s7"), "pay now")
        .await
        .unwrap();

    assert_eq!(reply.scam_status, ScamStatus::ScamConfirmed);
    assert_eq!(reply.extracted.scam_type_label(), Some("advance fee"));
}

#[tokio::test]
async fn non_json_reply_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/honeypot/message"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>starting up</html>"))
        .mount(&server)
        .await;

    let err = store_for(&server)
        .send_message(None, "Hello")
        .await
        .unwrap_err();

    assert!(matches!(err, HoneypotError::Decode { .. }));
    assert!(err.is_transport());
}

#[tokio::test]
async fn server_error_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/honeypot/sessions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let err = store_for(&server).list_sessions().await.unwrap_err();

    assert_eq!(err, HoneypotError::status(503, "unavailable"));
}

#[tokio::test]
async fn delete_session_ignores_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/honeypot/session/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not even json"))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server).delete_session("s1").await.unwrap();
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    // Nothing listens on port 1.
    let store = HttpSessionStore::new(&ApiConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        request_timeout_secs: Some(5),
    })
    .unwrap();

    let err = store.list_sessions().await.unwrap_err();
    assert!(matches!(err, HoneypotError::Transport(_)));
}
