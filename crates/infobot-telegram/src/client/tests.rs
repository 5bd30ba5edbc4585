//! Tests for Bot API envelope decoding, retries, and request shapes.

use httpmock::prelude::*;
use serde_json::json;

use super::{retry_delay, TelegramApiClient, TelegramClientConfig};
use crate::{BotCommand, BotCommandScope, ChatKind, TelegramApi, TelegramApiError};

fn test_client(base_url: &str) -> TelegramApiClient {
    TelegramApiClient::new(TelegramClientConfig {
        api_base: base_url.to_string(),
        bot_token: "123:test-token".to_string(),
        request_timeout_ms: 2_000,
        retry_max_attempts: 3,
        retry_base_delay_ms: 1,
    })
    .expect("client")
}

#[test]
fn unit_new_rejects_blank_token() {
    let result = TelegramApiClient::new(TelegramClientConfig {
        api_base: "https://api.telegram.org".to_string(),
        bot_token: "   ".to_string(),
        request_timeout_ms: 1_000,
        retry_max_attempts: 1,
        retry_base_delay_ms: 1,
    });
    assert!(matches!(result, Err(TelegramApiError::MissingToken)));
}

#[test]
fn unit_retry_delay_prefers_retry_after_and_caps_exponent() {
    assert_eq!(retry_delay(100, 1, Some(4)).as_secs(), 4);
    assert_eq!(retry_delay(100, 1, None).as_millis(), 100);
    assert_eq!(retry_delay(100, 3, None).as_millis(), 400);
    assert_eq!(retry_delay(1, 20, None).as_millis(), 64);
}

#[tokio::test]
async fn integration_get_chat_decodes_full_info() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/bot123:test-token/getChat")
            .header("x-infobot-retry-attempt", "0")
            .json_body_includes(json!({"chat_id": -1001}).to_string());
        then.status(200).json_body(json!({
            "ok": true,
            "result": {
                "id": -1001,
                "type": "supergroup",
                "title": "Rustaceans",
                "is_forum": true,
                "active_usernames": ["rust", "rust_ru"],
                "permissions": {"can_send_messages": true, "can_pin_messages": false}
            }
        }));
    });

    let chat = test_client(&server.base_url())
        .get_chat(-1001)
        .await
        .expect("get chat");
    assert_eq!(chat.kind, ChatKind::Supergroup);
    assert_eq!(chat.title.as_deref(), Some("Rustaceans"));
    assert_eq!(chat.is_forum, Some(true));
    assert_eq!(chat.has_hidden_members, None);
    let permissions = chat.permissions.expect("permissions");
    assert_eq!(permissions.can_send_messages, Some(true));
    assert_eq!(permissions.can_pin_messages, Some(false));
    assert_eq!(permissions.can_send_polls, None);
    mock.assert_calls(1);
}

#[tokio::test]
async fn integration_forbidden_envelope_is_not_retried() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/bot123:test-token/getChatAdministrators");
        then.status(403).json_body(json!({
            "ok": false,
            "error_code": 403,
            "description": "Forbidden: bot is not a member of the channel chat"
        }));
    });

    let error = test_client(&server.base_url())
        .get_chat_administrators(-5)
        .await
        .expect_err("forbidden");
    assert!(error.is_soft());
    assert!(matches!(error, TelegramApiError::Forbidden { .. }));
    mock.assert_calls(1);
}

#[tokio::test]
async fn integration_rate_limited_call_retries_with_retry_after() {
    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.method(POST)
            .path("/bot123:test-token/sendMessage")
            .header("x-infobot-retry-attempt", "0");
        then.status(429).json_body(json!({
            "ok": false,
            "error_code": 429,
            "description": "Too Many Requests: retry after 0",
            "parameters": {"retry_after": 0}
        }));
    });
    let second = server.mock(|when, then| {
        when.method(POST)
            .path("/bot123:test-token/sendMessage")
            .header("x-infobot-retry-attempt", "1")
            .json_body_includes(json!({"chat_id": 42, "text": "hello"}).to_string());
        then.status(200)
            .json_body(json!({"ok": true, "result": {"message_id": 9}}));
    });

    test_client(&server.base_url())
        .send_message(42, "hello", None)
        .await
        .expect("send eventually succeeds");
    first.assert_calls(1);
    second.assert_calls(1);
}

#[tokio::test]
async fn integration_server_errors_exhaust_retry_budget() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/bot123:test-token/getUpdates");
        then.status(502).body("bad gateway");
    });

    let error = test_client(&server.base_url())
        .get_updates(Some(10), 0)
        .await
        .expect_err("exhausted");
    match error {
        TelegramApiError::HttpStatus { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "bad gateway");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    mock.assert_calls(3);
}

#[tokio::test]
async fn integration_get_updates_sends_offset_and_allowed_updates() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/bot123:test-token/getUpdates")
            .json_body_includes(
                json!({
                    "offset": 11,
                    "timeout": 0,
                    "allowed_updates": ["message", "channel_post"]
                })
                .to_string(),
            );
        then.status(200).json_body(json!({
            "ok": true,
            "result": [{
                "update_id": 11,
                "channel_post": {
                    "message_id": 1,
                    "date": 1,
                    "chat": {"id": -7, "type": "channel"},
                    "text": "/info"
                }
            }]
        }));
    });

    let updates = test_client(&server.base_url())
        .get_updates(Some(11), 0)
        .await
        .expect("updates");
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].update_id, 11);
    assert!(updates[0].channel_post.is_some());
    mock.assert_calls(1);
}

#[tokio::test]
async fn integration_set_my_commands_sends_scope_object() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/bot123:test-token/setMyCommands")
            .json_body_includes(
                json!({
                    "commands": [{"command": "info", "description": "Информация о чате"}],
                    "scope": {"type": "all_group_chats"}
                })
                .to_string(),
            );
        then.status(200).json_body(json!({"ok": true, "result": true}));
    });

    test_client(&server.base_url())
        .set_my_commands(
            &[BotCommand::new("info", "Информация о чате")],
            BotCommandScope::AllGroupChats,
        )
        .await
        .expect("set commands");
    mock.assert_calls(1);
}

#[tokio::test]
async fn regression_error_messages_never_embed_the_token() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/bot123:test-token/getMe");
        then.status(200).body("not json");
    });

    let error = test_client(&server.base_url())
        .get_me()
        .await
        .expect_err("invalid body");
    assert!(matches!(error, TelegramApiError::Serde(_)));
    assert!(!error.to_string().contains("test-token"));
}
