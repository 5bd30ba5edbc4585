//! Retrying Bot API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use infobot_core::truncate_with_marker;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::types::TelegramEnvelope;
use crate::{
    BotCommand, BotCommandScope, ChatFullInfo, ChatMember, TelegramApi, TelegramApiError, Update,
    User,
};

const ERROR_BODY_MAX_CHARS: usize = 800;
const ALLOWED_UPDATES: [&str; 2] = ["message", "channel_post"];

#[derive(Debug, Clone)]
/// Connection settings for [`TelegramApiClient`].
pub struct TelegramClientConfig {
    pub api_base: String,
    pub bot_token: String,
    pub request_timeout_ms: u64,
    pub retry_max_attempts: usize,
    pub retry_base_delay_ms: u64,
}

#[derive(Clone)]
pub struct TelegramApiClient {
    http: reqwest::Client,
    api_base: String,
    bot_token: String,
    retry_max_attempts: usize,
    retry_base_delay_ms: u64,
}

impl TelegramApiClient {
    pub fn new(config: TelegramClientConfig) -> Result<Self, TelegramApiError> {
        let bot_token = config.bot_token.trim().to_string();
        if bot_token.is_empty() {
            return Err(TelegramApiError::MissingToken);
        }

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("infobot"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.request_timeout_ms.max(1)))
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base.trim().trim_end_matches('/').to_string(),
            bot_token,
            retry_max_attempts: config.retry_max_attempts.max(1),
            retry_base_delay_ms: config.retry_base_delay_ms.max(1),
        })
    }

    async fn call<T>(&self, method: &str, payload: &Value) -> Result<T, TelegramApiError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/bot{}/{}", self.api_base, self.bot_token, method);
        let mut attempt = 0_usize;
        loop {
            attempt = attempt.saturating_add(1);
            let response = self
                .http
                .post(url.as_str())
                .header(
                    "x-infobot-retry-attempt",
                    attempt.saturating_sub(1).to_string(),
                )
                .json(payload)
                .send()
                .await;

            let error = match response {
                Ok(response) => {
                    let status = response.status();
                    let retry_after_header = parse_retry_after(response.headers());
                    match response.text().await {
                        Ok(body) => match decode_envelope::<T>(status.as_u16(), &body) {
                            Ok(result) => return Ok(result),
                            Err(TelegramApiError::RateLimited {
                                retry_after_seconds: None,
                                description,
                            }) => TelegramApiError::RateLimited {
                                retry_after_seconds: retry_after_header,
                                description,
                            },
                            Err(other) => other,
                        },
                        Err(error) => TelegramApiError::Http(error.without_url()),
                    }
                }
                Err(error) => TelegramApiError::Http(error.without_url()),
            };

            if attempt < self.retry_max_attempts && error.is_retryable() {
                let delay = retry_delay(
                    self.retry_base_delay_ms,
                    attempt,
                    error.retry_after_seconds(),
                );
                tracing::debug!(
                    method,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    "retrying telegram api call"
                );
                tokio::time::sleep(delay).await;
                continue;
            }
            return Err(error);
        }
    }
}

fn decode_envelope<T>(status: u16, body: &str) -> Result<T, TelegramApiError>
where
    T: DeserializeOwned,
{
    let envelope = match serde_json::from_str::<TelegramEnvelope>(body) {
        Ok(envelope) => envelope,
        Err(error) => {
            if (200..300).contains(&status) {
                return Err(TelegramApiError::Serde(error));
            }
            return Err(TelegramApiError::HttpStatus {
                status,
                body: truncate_for_error(body, ERROR_BODY_MAX_CHARS),
            });
        }
    };

    if !envelope.ok {
        return Err(TelegramApiError::from_envelope(
            envelope.error_code.unwrap_or(status),
            envelope
                .description
                .map(|description| truncate_for_error(&description, ERROR_BODY_MAX_CHARS)),
            envelope
                .parameters
                .and_then(|parameters| parameters.retry_after),
        ));
    }

    let result = envelope
        .result
        .ok_or_else(|| TelegramApiError::InvalidResponse("response missing result".to_string()))?;
    Ok(serde_json::from_value(result)?)
}

#[async_trait]
impl TelegramApi for TelegramApiClient {
    async fn get_me(&self) -> Result<User, TelegramApiError> {
        self.call("getMe", &json!({})).await
    }

    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_seconds: u64,
    ) -> Result<Vec<Update>, TelegramApiError> {
        let mut payload = json!({
            "timeout": timeout_seconds,
            "allowed_updates": ALLOWED_UPDATES,
        });
        if let Some(offset) = offset {
            payload["offset"] = json!(offset);
        }
        self.call("getUpdates", &payload).await
    }

    async fn get_chat(&self, chat_id: i64) -> Result<ChatFullInfo, TelegramApiError> {
        self.call("getChat", &json!({ "chat_id": chat_id })).await
    }

    async fn get_chat_member_count(&self, chat_id: i64) -> Result<u64, TelegramApiError> {
        self.call("getChatMemberCount", &json!({ "chat_id": chat_id }))
            .await
    }

    async fn get_chat_administrators(
        &self,
        chat_id: i64,
    ) -> Result<Vec<ChatMember>, TelegramApiError> {
        self.call("getChatAdministrators", &json!({ "chat_id": chat_id }))
            .await
    }

    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        message_thread_id: Option<i64>,
    ) -> Result<(), TelegramApiError> {
        let mut payload = json!({
            "chat_id": chat_id,
            "text": text,
        });
        if let Some(message_thread_id) = message_thread_id {
            payload["message_thread_id"] = json!(message_thread_id);
        }
        let _: Value = self.call("sendMessage", &payload).await?;
        Ok(())
    }

    async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<(), TelegramApiError> {
        let _: bool = self
            .call(
                "deleteWebhook",
                &json!({ "drop_pending_updates": drop_pending_updates }),
            )
            .await?;
        Ok(())
    }

    async fn set_my_commands(
        &self,
        commands: &[BotCommand],
        scope: BotCommandScope,
    ) -> Result<(), TelegramApiError> {
        let _: bool = self
            .call(
                "setMyCommands",
                &json!({ "commands": commands, "scope": scope }),
            )
            .await?;
        Ok(())
    }
}

fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
}

fn retry_delay(base_delay_ms: u64, attempt: usize, retry_after_seconds: Option<u64>) -> Duration {
    if let Some(retry_after_seconds) = retry_after_seconds {
        return Duration::from_secs(retry_after_seconds);
    }
    let exponent = attempt.saturating_sub(1).min(6) as u32;
    let scale = 2_u64.pow(exponent);
    Duration::from_millis(base_delay_ms.max(1).saturating_mul(scale))
}

fn truncate_for_error(value: &str, max_chars: usize) -> String {
    truncate_with_marker(value, max_chars, "...")
}

#[cfg(test)]
mod tests;
