use std::time::Duration;

use chrono::DateTime;
use deskchat::api::{ApiClient, Role};
use deskchat::config::Settings;
use deskchat::session::sync::SendStatus;
use deskchat::ui::{MemoryRenderer, Selection, SessionPlaceholder, ViewEvent};
use deskchat::App;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_for(base: &str, session: &str) -> App<MemoryRenderer> {
    let api = ApiClient::new(base).unwrap();
    App::new(api, Settings::default(), session, MemoryRenderer::new())
}

async fn mount_sessions(server: &MockServer, sessions: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sessions": sessions })))
        .mount(server)
        .await;
}

async fn mount_history(server: &MockServer, id: &str, messages: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/sessions/{}/messages", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "messages": messages })))
        .mount(server)
        .await;
}

async fn mount_reply(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn user_echo_is_rendered_before_the_reply_arrives() {
    let server = MockServer::start().await;
    mount_sessions(&server, json!(["default"])).await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"response": "done"}))
                .set_delay(Duration::from_millis(150)),
        )
        .mount(&server)
        .await;
    let mut app = app_for(&format!("{}/api", server.uri()), "default");

    app.send_message("  check stock  ").await;

    let events = &app.view().events;
    assert_eq!(events[0], ViewEvent::Appended(Role::User));
    assert_eq!(events[1], ViewEvent::Busy(true));
    assert_eq!(events[2], ViewEvent::Appended(Role::Assistant));
    assert_eq!(events[3], ViewEvent::Busy(false));
    let echo = &app.view().messages[0];
    assert_eq!(echo.content, "check stock");
    assert!(echo.time_label.is_none());
    assert!(app.view().messages[1].time_label.is_some());
    assert!(!app.view().busy);
}

#[tokio::test]
async fn blank_message_does_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/sessions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let mut app = app_for(&format!("{}/api", server.uri()), "default");

    assert_eq!(app.send_message("").await, SendStatus::Skipped);
    assert_eq!(app.send_message(" \t\n ").await, SendStatus::Skipped);
    assert!(app.view().events.is_empty());
    assert!(app.context().transcript().is_empty());
}

#[tokio::test]
async fn logical_error_is_rendered_as_marked_assistant_message() {
    let server = MockServer::start().await;
    mount_sessions(&server, json!(["default"])).await;
    mount_reply(&server, json!({"error": "Book not found"})).await;
    let mut app = app_for(&format!("{}/api", server.uri()), "default");

    assert_eq!(app.send_message("order 42").await, SendStatus::Rejected);

    let reply = &app.view().messages[1];
    assert_eq!(reply.role, Role::Assistant);
    assert_eq!(reply.content, "Error: Book not found");
    assert!(!app.view().busy);
}

#[tokio::test]
async fn missing_history_renders_empty_without_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sessions/brand-new/messages"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let mut app = app_for(&format!("{}/api", server.uri()), "brand-new");

    app.load_current_session().await;

    assert!(app.view().messages.is_empty());
    assert!(app.view().notices.is_empty());
    assert_eq!(app.view().events, vec![ViewEvent::Cleared]);
}

#[tokio::test]
async fn unreachable_server_always_ends_in_a_render() {
    let mut app = app_for("http://127.0.0.1:1/api", "default");

    app.start().await;
    assert_eq!(app.view().notices.len(), 1);
    assert_eq!(app.view().notices[0].0, "Server Connection Error");
    assert!(app.view().notices[0].1.contains("http://127.0.0.1:1/api"));
    assert_eq!(app.view().placeholder, Some(SessionPlaceholder::Unreachable));
    assert!(app.view().messages.is_empty());

    assert_eq!(app.send_message("hello").await, SendStatus::Unreachable);
    let transcript = app.view().transcript();
    assert_eq!(transcript[0], (Role::User, "hello"));
    assert_eq!(transcript[1].0, Role::Assistant);
    assert!(transcript[1].1.starts_with("Cannot connect to server"));
    assert!(!app.view().busy);
}

#[tokio::test]
async fn server_error_on_chat_explains_the_status() {
    let server = MockServer::start().await;
    mount_sessions(&server, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "agent crashed"})))
        .mount(&server)
        .await;
    let mut app = app_for(&format!("{}/api", server.uri()), "default");

    assert_eq!(app.send_message("hi").await, SendStatus::Unreachable);
    let reply = &app.view().messages[1].content;
    assert!(reply.starts_with("Connection Error: Server error: 500"), "{}", reply);
}

#[tokio::test]
async fn failed_history_load_leaves_view_alone() {
    let server = MockServer::start().await;
    mount_history(&server, "s1", json!([{"role": "user", "content": "kept"}])).await;
    Mock::given(method("GET"))
        .and(path("/api/sessions/broken/messages"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let mut app = app_for(&format!("{}/api", server.uri()), "s1");
    app.load_current_session().await;
    assert_eq!(app.view().messages.len(), 1);

    app.switch_session("broken").await;

    assert!(app.view().messages.is_empty());
    assert!(app.view().notices.is_empty());
    assert_eq!(app.current_session(), "broken");
}

#[tokio::test]
async fn switching_shows_only_the_new_sessions_messages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;
    mount_sessions(&server, json!(["a", "b"])).await;
    mount_history(&server, "a", json!([
        {"role": "user", "content": "from a", "created_at": "2025-03-01 09:15:30"},
        {"role": "assistant", "content": "reply in a", "created_at": "2025-03-01 09:15:31"}
    ]))
    .await;
    mount_history(&server, "b", json!([
        {"role": "user", "content": "from b", "created_at": "2025-03-02T10:00:00Z"}
    ]))
    .await;
    let mut app = app_for(&format!("{}/api", server.uri()), "a");
    app.start().await;
    assert!(app.view().notices.is_empty());
    assert_eq!(app.view().messages.len(), 2);
    assert!(app.view().messages[0].time_label.is_some());
    assert_eq!(app.view().active_session.as_deref(), Some("a"));

    app.switch_session("b").await;

    assert_eq!(app.view().transcript(), vec![(Role::User, "from b")]);
    assert_eq!(app.context().transcript().session_id(), "b");
    assert_eq!(app.context().transcript().len(), 1);
    assert_eq!(app.view().selection, Some(Selection::Existing("b".into())));
    assert_eq!(app.view().active_session.as_deref(), Some("b"));
}

#[tokio::test]
async fn switching_to_current_session_reloads() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sessions/a/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"messages": [{"role": "user", "content": "x"}]})))
        .expect(2)
        .mount(&server)
        .await;
    let mut app = app_for(&format!("{}/api", server.uri()), "a");

    app.switch_session("a").await;
    app.switch_session("a").await;

    assert_eq!(app.view().transcript(), vec![(Role::User, "x")]);
}

#[tokio::test]
async fn new_session_gets_timestamp_id_and_empty_view() {
    let server = MockServer::start().await;
    mount_sessions(&server, json!(["default"])).await;
    mount_history(&server, "default", json!([{"role": "user", "content": "old"}])).await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "unexpected"})))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/api/sessions/session-.*/messages$"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&server)
        .await;
    let mut app = app_for(&format!("{}/api", server.uri()), "default");
    app.load_current_session().await;
    assert_eq!(app.view().messages.len(), 1);

    let id = app.create_session().await;

    let stamp = id.strip_prefix("session-").expect("session- prefix");
    assert!(!stamp.contains(':') && !stamp.contains('.'));
    let mut iso: Vec<char> = stamp.chars().collect();
    assert_eq!(iso.len(), 24);
    iso[13] = ':';
    iso[16] = ':';
    iso[19] = '.';
    let iso: String = iso.into_iter().collect();
    assert!(DateTime::parse_from_rfc3339(&iso).is_ok(), "{}", iso);

    assert_eq!(app.current_session(), id);
    assert!(app.view().messages.is_empty());
    assert!(app.context().transcript().is_empty());
    assert_eq!(app.view().selection, Some(Selection::New(id.clone())));
    assert_eq!(app.view().sessions, vec!["default"]);
    assert_eq!(app.view().active_session, None);
}

#[tokio::test]
async fn hello_then_hi_in_order() {
    let server = MockServer::start().await;
    mount_sessions(&server, json!(["s1"])).await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({"message": "hello", "session_id": "s1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "hi", "session_id": "s1"})))
        .expect(1)
        .mount(&server)
        .await;
    let mut app = app_for(&format!("{}/api", server.uri()), "s1");

    assert_eq!(app.send_message("hello").await, SendStatus::Replied);

    assert_eq!(app.view().transcript(), vec![(Role::User, "hello"), (Role::Assistant, "hi")]);
    assert_eq!(app.view().sessions, vec!["s1"]);
    assert_eq!(app.view().active_session.as_deref(), Some("s1"));
}

#[tokio::test]
async fn empty_session_list_shows_placeholder() {
    let server = MockServer::start().await;
    mount_sessions(&server, json!([])).await;
    let mut app = app_for(&format!("{}/api", server.uri()), "default");

    app.refresh_sessions().await;

    assert_eq!(app.view().placeholder, Some(SessionPlaceholder::NoSessions));
    assert!(app.view().sessions.is_empty());
}
