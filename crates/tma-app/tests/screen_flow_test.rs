//! End-to-end screen flows: real HTTP transport against a mock backend,
//! in-memory bridge for the host side.

use std::rc::Rc;

use mockito::Server;
use tma_app::{BridgeAdapter, MiniAppScreen, ScreenDeps};
use tma_core::{ChoiceSet, ColorScheme, LaunchUser, StatusMessage};
use tma_infra::{ReqwestCommandTransport, SystemClock};
use tma_platform::bridge::ops;
use tma_platform::theme::FixedSystemTheme;
use tma_platform::RecordingBridge;

fn screen(bridge: BridgeAdapter, api_url: &str) -> MiniAppScreen {
    MiniAppScreen::new(ScreenDeps {
        bridge,
        system_theme: Rc::new(FixedSystemTheme(ColorScheme::Light)),
        transport: Rc::new(ReqwestCommandTransport::new()),
        api_url: api_url.to_string(),
        clock: Rc::new(SystemClock),
        choices: ChoiceSet::default(),
        main_button_text: "Отправить боту".into(),
    })
}

fn tester() -> LaunchUser {
    LaunchUser {
        id: 42,
        first_name: "Ира".into(),
        last_name: None,
        username: Some("ira".into()),
        language_code: Some("ru".into()),
    }
}

#[tokio::test]
async fn server_error_status_carries_code_and_body() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/command")
        .with_status(500)
        .with_body("oops")
        .create_async()
        .await;
    let screen = screen(BridgeAdapter::absent(), &server.url());
    screen.start();

    screen.send_to_server().await;

    let status = screen.status();
    assert!(status.as_str().contains("500"), "{status}");
    assert!(status.as_str().contains("oops"), "{status}");
}

#[tokio::test]
async fn html_reply_degrades_to_diagnostic() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/command")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html>err</html>")
        .create_async()
        .await;
    let screen = screen(BridgeAdapter::absent(), &server.url());
    screen.start();

    screen.send_to_server().await;

    let status = screen.status();
    assert!(status.as_str().contains("не JSON"), "{status}");
    assert!(status.as_str().contains("<html>err"), "{status}");
}

#[tokio::test]
async fn json_reply_message_becomes_status() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/command")
        .match_header("x-requested-with", "TelegramWebApp")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"ok"}"#)
        .create_async()
        .await;
    let bridge = Rc::new(RecordingBridge::new().with_init_data("query_id=1"));
    let screen = screen(BridgeAdapter::from_handle(bridge), &format!("{}/", server.url()));
    screen.start();
    screen.set_text("hello");

    screen.send_to_server().await;

    mock.assert_async().await;
    assert_eq!(screen.status(), StatusMessage::server_reply("ok"));
}

#[tokio::test]
async fn missing_backend_url_is_reported_not_sent() {
    let screen = screen(BridgeAdapter::absent(), "");
    screen.start();

    screen.send_to_server().await;

    assert!(screen.status().as_str().contains("MINIAPP_API_URL"));
}

#[tokio::test]
async fn sending_indicator_is_rendered_before_the_reply() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/command")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"done":true}"#)
        .create_async()
        .await;
    let screen = screen(BridgeAdapter::absent(), &server.url());
    let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
    let log = seen.clone();
    screen.set_render_hook(Rc::new(move |view| log.borrow_mut().push(view.status.clone())));

    screen.send_to_server().await;

    let seen = seen.borrow();
    assert_eq!(seen.first().map(String::as_str), Some("Отправка..."));
    assert_eq!(seen.last().map(String::as_str), Some(r#"Ответ сервера: {"done":true}"#));
}

#[test]
fn absent_bridge_reports_unavailability_for_bridge_actions() {
    let screen = screen(BridgeAdapter::absent(), "");
    screen.start();
    let unavailable = StatusMessage::from_error(&tma_core::MiniAppError::BridgeUnavailable);

    screen.send_to_bot();
    assert_eq!(screen.status(), unavailable);

    screen.clear();
    assert!(screen.bind_primary_action().is_err());
    assert_eq!(screen.status(), unavailable);
}

#[test]
fn clear_resets_text_selection_and_status() {
    let bridge = Rc::new(RecordingBridge::new());
    let screen = screen(BridgeAdapter::from_handle(bridge), "");
    screen.start();
    screen.set_text("something");
    screen.select("🍑").unwrap();
    screen.send_to_bot();
    assert!(!screen.status().is_empty());

    screen.clear();

    let form = screen.form();
    assert!(form.text.is_empty());
    assert!(form.selected.is_none());
    assert!(screen.status().is_empty());
}

#[test]
fn selecting_twice_keeps_a_single_marker() {
    let screen = screen(BridgeAdapter::absent(), "");
    screen.start();

    screen.select("🍎").unwrap();
    screen.select("🍎").unwrap();

    let view = screen.view();
    assert_eq!(view.selected_glyph(), Some("🍎"));
    assert_eq!(view.choices.iter().filter(|c| c.selected).count(), 1);
}

#[test]
fn many_form_changes_leave_exactly_one_primary_handler() {
    let bridge = Rc::new(RecordingBridge::new().with_user(tester()));
    let screen = screen(BridgeAdapter::from_handle(bridge.clone()), "");
    screen.start();

    for text in ["a", "ab", "abc"] {
        screen.set_text(text);
    }
    screen.select("🍇").unwrap();
    bridge.click_main_button();

    assert_eq!(bridge.active_handler_count(), 1);
    assert_eq!(bridge.sent_data().len(), 1);
    assert!(bridge.main_button_visible());
    assert_eq!(bridge.main_button_text(), "Отправить боту");
    assert_eq!(screen.view().greeting, "Привет, Ира");
}

#[test]
fn host_theme_push_keeps_form_state() {
    let bridge = Rc::new(RecordingBridge::new().with_scheme(ColorScheme::Light));
    let screen = screen(BridgeAdapter::from_handle(bridge.clone()), "");
    screen.start();
    screen.set_text("keep me");
    screen.select("🍌").unwrap();

    bridge.push_theme(ColorScheme::Dark);

    assert_eq!(screen.scheme(), ColorScheme::Dark);
    assert_eq!(screen.form().text, "keep me");
    assert!(screen.form().is_selected("🍌"));
    assert_eq!(bridge.call_count(ops::ON_THEME_CHANGED), 1);
}

#[test]
fn cosmetic_host_failures_never_surface() {
    let bridge = Rc::new(RecordingBridge::new());
    for op in [ops::READY, ops::EXPAND, ops::ON_THEME_CHANGED, ops::SHOW_MAIN_BUTTON] {
        bridge.fail_on(op);
    }
    let screen = screen(BridgeAdapter::from_handle(bridge.clone()), "");

    screen.start();

    assert!(screen.status().is_empty());
    assert_eq!(bridge.active_handler_count(), 1);
}
