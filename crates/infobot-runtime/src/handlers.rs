//! Per-route handlers. Errors returned from here are handler-fatal and are
//! reported by the event stream; expected failures are answered in-chat.

use std::sync::Arc;

use anyhow::{Context, Result};
use infobot_telegram::{Message, TelegramApi};

use crate::aggregator::{ChatInfoRequest, EntityInfoAggregator};
use crate::commands::START_HELP_TEXT;
use crate::formatter::{format_chat_report, format_user_report};
use crate::render::custom_emoji_ids_reply;
use crate::router::Route;

pub const USER_UNAVAILABLE_TEXT: &str = "Не удалось получить данные пользователя";
pub const CHAT_UNAVAILABLE_TEXT: &str = "Не удалось получить информацию о чате";

#[derive(Clone)]
pub struct InfoBotHandlers {
    api: Arc<dyn TelegramApi>,
}

impl InfoBotHandlers {
    pub fn new(api: Arc<dyn TelegramApi>) -> Self {
        Self { api }
    }

    pub async fn handle(&self, route: Route, message: &Message) -> Result<()> {
        match route {
            Route::Start => self.reply(message, START_HELP_TEXT).await,
            Route::UserInfo => self.handle_user_info(message).await,
            Route::GroupInfo => {
                self.handle_chat_info(message, ChatInfoRequest::from_message(message))
                    .await
            }
            Route::ChannelInfo => {
                self.handle_chat_info(message, ChatInfoRequest::for_chat(message.chat.id))
                    .await
            }
            Route::CustomEmojiIds(ids) => match custom_emoji_ids_reply(&ids) {
                Some(text) => self.reply(message, &text).await,
                None => Ok(()),
            },
            Route::Ignore => Ok(()),
        }
    }

    async fn handle_user_info(&self, message: &Message) -> Result<()> {
        let Some(user) = message.from.as_ref() else {
            return self.reply(message, USER_UNAVAILABLE_TEXT).await;
        };
        let subject = EntityInfoAggregator::new(self.api.as_ref())
            .collect_user(user)
            .await;
        self.reply(message, &format_user_report(&subject)).await
    }

    async fn handle_chat_info(&self, message: &Message, request: ChatInfoRequest) -> Result<()> {
        let collected = EntityInfoAggregator::new(self.api.as_ref())
            .collect_chat(&request)
            .await;
        match collected {
            Ok(subject) => self.reply(message, &format_chat_report(&subject)).await,
            Err(error) => {
                tracing::warn!(
                    chat_id = request.chat_id,
                    error = %error,
                    "chat base record unavailable"
                );
                self.reply(message, CHAT_UNAVAILABLE_TEXT).await
            }
        }
    }

    async fn reply(&self, message: &Message, text: &str) -> Result<()> {
        let thread_id = message
            .message_thread_id
            .filter(|_| message.is_topic_message.unwrap_or(false));
        self.api
            .send_message(message.chat.id, text, thread_id)
            .await
            .with_context(|| format!("failed to send reply to chat {}", message.chat.id))
    }
}
