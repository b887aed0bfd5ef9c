//! ReqwestCommandTransport against a local mock backend.

use mockito::{Matcher, Server};
use serde_json::json;
use tma_core::endpoint::command_url;
use tma_core::ports::CommandTransportPort;
use tma_core::{ChoiceSet, FormState, OutboundPayload};
use tma_infra::ReqwestCommandTransport;

fn sample_payload() -> OutboundPayload {
    let mut form = FormState::new();
    form.set_text("hello");
    form.select(&ChoiceSet::default(), "🍎").unwrap();
    OutboundPayload::from_form(&form, Some("query_id=AAE".to_string()), 1)
}

#[tokio::test]
async fn posts_json_with_client_marker_header() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/command")
        .match_header("x-requested-with", "TelegramWebApp")
        .match_header("content-type", Matcher::Regex("application/json".into()))
        .match_body(Matcher::Json(json!({
            "action": "do_something",
            "payload": { "text": "hello", "selected": "🍎" },
            "initData": "query_id=AAE"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"ok"}"#)
        .create_async()
        .await;

    let url = command_url(&format!("{}/", server.url())).unwrap();
    let raw = ReqwestCommandTransport::new()
        .post_command(&url, &sample_payload())
        .await
        .expect("response expected");

    mock.assert_async().await;
    assert_eq!(raw.status, 200);
    assert_eq!(raw.content_type.as_deref(), Some("application/json"));
    assert_eq!(raw.body.as_deref(), Ok(r#"{"message":"ok"}"#));
}

#[tokio::test]
async fn reports_error_status_and_body_verbatim() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/command")
        .with_status(500)
        .with_body("oops")
        .create_async()
        .await;

    let url = command_url(&server.url()).unwrap();
    let raw = ReqwestCommandTransport::new()
        .post_command(&url, &sample_payload())
        .await
        .expect("response expected");

    mock.assert_async().await;
    assert_eq!(raw.status, 500);
    assert_eq!(raw.status_text, "Internal Server Error");
    assert_eq!(raw.body.as_deref(), Ok("oops"));
}

#[tokio::test]
async fn reports_html_content_type() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/command")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html>err</html>")
        .create_async()
        .await;

    let url = command_url(&server.url()).unwrap();
    let raw = ReqwestCommandTransport::new()
        .with_timeout(Some(std::time::Duration::from_secs(5)))
        .post_command(&url, &sample_payload())
        .await
        .expect("response expected");

    assert_eq!(raw.content_type.as_deref(), Some("text/html"));
    assert_eq!(raw.body.as_deref(), Ok("<html>err</html>"));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Port 1 is reserved (tcpmux) and not listening on test hosts.
    let err = ReqwestCommandTransport::new()
        .post_command("http://127.0.0.1:1/api/command", &sample_payload())
        .await
        .expect_err("connection must fail");

    assert!(!err.0.is_empty());
}
